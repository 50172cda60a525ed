//! Conversion from dataset DTOs to snapshot inputs.

use crate::domain::{Fare, Landmark, Route};
use crate::snapshot::{ProximityLink, Snapshot};

use super::error::DatasetError;
use super::types::{DatasetDto, FareDto, NestedLandmarkDto, RouteDto};

/// Label used when a route has no fare recorded.
const UNKNOWN_FARE: &str = "غير محددة";

/// Tables ready for [`Snapshot::load`].
#[derive(Debug, Clone, Default)]
pub struct DatasetTables {
    pub landmarks: Vec<Landmark>,
    pub routes: Vec<Route>,
    pub links: Vec<ProximityLink>,
}

impl DatasetTables {
    pub fn into_snapshot(self) -> Result<Snapshot, DatasetError> {
        Ok(Snapshot::load(self.landmarks, self.routes, self.links)?)
    }
}

/// Flatten a dataset document.
///
/// Flat landmarks come first, then nested ones in document order. Legacy
/// string entries become landmarks with no route links.
pub fn convert_dataset(dto: DatasetDto, currency: &str) -> DatasetTables {
    let mut landmarks: Vec<Landmark> = dto
        .landmarks
        .into_iter()
        .map(|l| Landmark::new(l.name, l.neighborhood, l.category))
        .collect();

    for (neighborhood, categories) in dto.neighborhoods {
        for (category, entries) in categories {
            for entry in entries {
                let landmark = match entry {
                    NestedLandmarkDto::Legacy(name) => {
                        Landmark::new(name, neighborhood.clone(), category.clone())
                    }
                    NestedLandmarkDto::Record { name, served_by } => Landmark {
                        served_by,
                        ..Landmark::new(name, neighborhood.clone(), category.clone())
                    },
                };
                landmarks.push(landmark);
            }
        }
    }

    let routes = dto
        .routes
        .into_iter()
        .map(|r| convert_route(r, currency))
        .collect();

    DatasetTables {
        landmarks,
        routes,
        links: dto.proximity_links,
    }
}

pub fn convert_route(dto: RouteDto, currency: &str) -> Route {
    let fare = match dto.fare {
        Some(FareDto::Amount(amount)) => Fare::from_amount(amount, currency),
        Some(FareDto::Label(label)) if !label.trim().is_empty() => Fare::new(label),
        _ => Fare::new(UNKNOWN_FARE),
    };

    let mut route = Route::new(dto.name, fare, dto.stops);
    if let Some(base) = dto.base_name.filter(|b| !b.trim().is_empty()) {
        route = route.with_base_name(base.trim());
    }
    if let Some(notes) = dto.notes {
        route = route.with_notes(notes);
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_dto(fare: Option<FareDto>) -> RouteDto {
        RouteDto {
            name: "خط 7 (داخلي)".into(),
            fare,
            stops: vec!["A".into()],
            notes: Some("  ".into()),
            base_name: None,
        }
    }

    #[test]
    fn fares() {
        let r = convert_route(route_dto(Some(FareDto::Amount(5.0))), "جنيه");
        assert_eq!(r.fare.label(), "5 جنيه");

        let r = convert_route(route_dto(Some(FareDto::Label("3 جنيه مصري".into()))), "جنيه");
        assert_eq!(r.fare.label(), "3 جنيه مصري");

        let r = convert_route(route_dto(None), "جنيه");
        assert_eq!(r.fare.label(), UNKNOWN_FARE);
    }

    #[test]
    fn base_name_derived_or_given() {
        let r = convert_route(route_dto(None), "جنيه");
        assert_eq!(r.base_name, "خط 7");
        assert_eq!(r.notes, None);

        let mut dto = route_dto(None);
        dto.base_name = Some("الخط السابع".into());
        assert_eq!(convert_route(dto, "جنيه").base_name, "الخط السابع");
    }

    #[test]
    fn nested_landmarks_are_flattened() {
        let json = r#"{
            "landmarks": [{"name": "الجامعة", "neighborhood": "الشرق", "category": "تعليم"}],
            "neighborhoods": {"الزهور": {"أسواق": ["السوق", {"name": "المول", "served_by": {"R1": {"proximity": "far"}}}]}},
            "routes": [{"name": "R1", "fare": 2, "stops": ["A"]}]
        }"#;
        let dto: DatasetDto = serde_json::from_str(json).unwrap();
        let tables = convert_dataset(dto, "جنيه");

        let names: Vec<&str> = tables.landmarks.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["الجامعة", "السوق", "المول"]);
        assert_eq!(tables.landmarks[1].neighborhood, "الزهور");
        assert_eq!(tables.landmarks[1].category, "أسواق");
        assert!(tables.landmarks[1].served_by.is_empty());
        assert_eq!(tables.landmarks[2].served_by.len(), 1);

        let snapshot = tables.into_snapshot().unwrap();
        assert_eq!(snapshot.index.len(), 3);
    }
}
