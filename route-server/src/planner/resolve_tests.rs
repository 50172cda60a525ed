//! Scenario tests for route resolution.

use super::*;
use crate::domain::{Fare, Landmark, Proximity, Route};
use crate::query::{Keywords, QueryParser};
use crate::snapshot::{ProximityLink, Snapshot};

struct Fixture {
    snapshot: Snapshot,
    config: ResolverConfig,
    parser: QueryParser,
}

impl Fixture {
    fn new(landmarks: Vec<Landmark>, routes: Vec<Route>, links: Vec<ProximityLink>) -> Self {
        Self {
            snapshot: Snapshot::load(landmarks, routes, links).unwrap(),
            config: ResolverConfig::default(),
            parser: QueryParser::new(Keywords::default()).unwrap(),
        }
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.snapshot, &self.config, &self.parser)
    }
}

fn route(name: &str, fare: &str, stops: &[&str]) -> Route {
    Route::new(name, Fare::new(fare), stops.iter().map(|s| s.to_string()).collect())
}

fn landmark(name: &str, neighborhood: &str) -> Landmark {
    Landmark::new(name, neighborhood, "عام")
}

fn link(landmark: &str, base: &str, proximity: Proximity, stop: &str) -> ProximityLink {
    ProximityLink {
        landmark_name: landmark.to_string(),
        base_route_name: base.to_string(),
        proximity,
        nearest_stop: Some(stop.to_string()),
    }
}

/// A small Arabic network: line 7 runs both ways between the hospital and
/// the university; line 8 runs from the university to the port.
fn city() -> Fixture {
    Fixture::new(
        vec![
            landmark("المستشفى العام", "الشرق"),
            landmark("الجامعة", "الشرق"),
            landmark("الميناء", "العرب"),
        ],
        vec![
            route(
                "خط 7 (ذهاب)",
                "5 جنيه",
                &["موقف المستشفى", "شارع محمد علي", "الجامعة"],
            ),
            route(
                "خط 7 (عودة)",
                "5 جنيه",
                &["الجامعة", "شارع محمد علي", "موقف المستشفى"],
            ),
            route("خط 8", "3 جنيه", &["الجامعة", "كورنيش", "الميناء"]),
        ],
        vec![
            link("المستشفى العام", "خط 7", Proximity::VeryNear, "المستشفى"),
            link("الجامعة", "خط 7", Proximity::Medium, "الجامعة"),
            link("الجامعة", "خط 8", Proximity::VeryNear, "الجامعة"),
            link("الميناء", "خط 8", Proximity::VeryNear, "الميناء"),
        ],
    )
}

// ============================================================================
// Structured resolution
// ============================================================================

#[test]
fn same_landmark_is_self_match_without_lookup() {
    let f = city();
    let result = f.resolver().resolve("Nowhere Street", "  nowhere   street ");

    assert_eq!(result.status, Status::SelfMatch);
    assert!(result.suggestions.is_empty());
    assert_eq!(result.reason, None);
}

#[test]
fn direct_route_found() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("D", "n")],
        vec![route("R1", "5 جنيه", &["A", "B", "C", "D"])],
        vec![
            link("A", "R1", Proximity::VeryNear, "A"),
            link("D", "R1", Proximity::VeryNear, "D"),
        ],
    );

    let result = f.resolver().resolve("A", "D");
    assert_eq!(result.status, Status::DirectFound);
    assert_eq!(result.start.as_deref(), Some("A"));
    assert_eq!(result.end.as_deref(), Some("D"));

    let routes: Vec<&RouteSuggestion> = result.direct_routes().collect();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].route_name, "R1");
    assert_eq!(routes[0].fare, "5 جنيه");
    assert_eq!((routes[0].boarding_index, routes[0].alighting_index), (0, 3));
    assert_eq!(routes[0].boarding_stop, "A");
    assert_eq!(routes[0].alighting_stop, "D");
}

#[test]
fn unlinked_destination_is_not_found() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("E", "n")],
        vec![route("R1", "5 جنيه", &["A", "B", "C"])],
        vec![link("A", "R1", Proximity::VeryNear, "A")],
    );

    let result = f.resolver().resolve("A", "E");
    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::NoCommonRoute));
    assert!(result.suggestions.is_empty());
}

#[test]
fn transfer_found_when_no_direct_route() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("E", "n")],
        vec![
            route("R1", "5 جنيه", &["A", "B", "C"]),
            route("R2", "3 جنيه", &["C", "D", "E"]),
        ],
        vec![
            link("A", "R1", Proximity::VeryNear, "A"),
            link("E", "R2", Proximity::VeryNear, "E"),
        ],
    );

    let result = f.resolver().resolve("A", "E");
    assert_eq!(result.status, Status::TransferFound);

    let transfers: Vec<&TransferSuggestion> = result.transfers().collect();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].first_route, "R1");
    assert_eq!(transfers[0].second_route, "R2");
    assert_eq!(transfers[0].transfer_points, vec!["C"]);
    assert_eq!(transfers[0].combined_fare, "5 جنيه + 3 جنيه");
}

#[test]
fn wrong_direction_is_no_valid_sequence() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("D", "n")],
        vec![route("R1", "5 جنيه", &["A", "B", "C", "D"])],
        vec![
            link("A", "R1", Proximity::VeryNear, "A"),
            link("D", "R1", Proximity::VeryNear, "D"),
        ],
    );

    let result = f.resolver().resolve("D", "A");
    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::NoValidSequence));
}

#[test]
fn link_to_a_stop_off_the_route_is_no_common_route() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("D", "n")],
        vec![route("R1", "5 جنيه", &["A", "B", "C"])],
        vec![
            link("A", "R1", Proximity::VeryNear, "A"),
            link("D", "R1", Proximity::VeryNear, "Z"),
        ],
    );
    assert_eq!(f.snapshot.integrity_issues.len(), 1);

    let result = f.resolver().resolve("A", "D");
    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::NoCommonRoute));
}

#[test]
fn explicit_base_name_gives_direct_route() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("D", "n")],
        vec![
            route("Line 7 (inner)", "5 جنيه", &["A", "B", "C", "D"]).with_base_name("Seventh"),
        ],
        vec![
            link("A", "Seventh", Proximity::VeryNear, "A"),
            link("D", "Seventh", Proximity::VeryNear, "D"),
        ],
    );
    assert!(f.snapshot.integrity_issues.is_empty());

    let result = f.resolver().resolve("A", "D");
    assert_eq!(result.status, Status::DirectFound);
    let routes: Vec<&RouteSuggestion> = result.direct_routes().collect();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].route_name, "Line 7 (inner)");
    assert_eq!(routes[0].base_name, "Seventh");
}

#[test]
fn far_proximity_never_gives_direct_route() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("D", "n")],
        vec![route("R1", "5 جنيه", &["A", "B", "C", "D"])],
        vec![
            link("A", "R1", Proximity::VeryNear, "A"),
            link("D", "R1", Proximity::Far, "D"),
        ],
    );

    let result = f.resolver().resolve("A", "D");
    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::NoCommonRoute));
}

#[test]
fn picks_the_variant_running_the_right_way() {
    let f = city();

    let outbound = f.resolver().resolve("المستشفى العام", "الجامعة");
    assert_eq!(outbound.status, Status::DirectFound);
    let names: Vec<&str> = outbound.direct_routes().map(|r| r.route_name.as_str()).collect();
    assert_eq!(names, vec!["خط 7 (ذهاب)"]);
    let first = outbound.direct_routes().next().unwrap();
    assert_eq!(first.boarding_stop, "موقف المستشفى");
    assert_eq!(first.start_proximity, Proximity::VeryNear);
    assert_eq!(first.end_proximity, Proximity::Medium);

    let inbound = f.resolver().resolve("الجامعة", "المستشفى العام");
    let names: Vec<&str> = inbound.direct_routes().map(|r| r.route_name.as_str()).collect();
    assert_eq!(names, vec!["خط 7 (عودة)"]);
}

#[test]
fn loop_variants_are_all_listed() {
    let f = Fixture::new(
        vec![landmark("Market", "n"), landmark("Harbour", "n")],
        vec![
            route("Loop (inner)", "4", &["Market", "Harbour", "Depot", "Market"]),
            route("Loop (outer)", "4", &["Market", "Depot", "Harbour", "Market"]),
        ],
        vec![
            link("Market", "Loop", Proximity::VeryNear, "Market"),
            link("Harbour", "Loop", Proximity::VeryNear, "Harbour"),
        ],
    );

    let result = f.resolver().resolve("market", "HARBOUR");
    assert_eq!(result.status, Status::DirectFound);
    let found: Vec<(&str, usize, usize)> = result
        .direct_routes()
        .map(|r| (r.route_name.as_str(), r.boarding_index, r.alighting_index))
        .collect();
    assert_eq!(found, vec![("Loop (inner)", 0, 1), ("Loop (outer)", 0, 2)]);
}

#[test]
fn unknown_start_offers_suggestions() {
    let f = city();
    let result = f.resolver().resolve("المستشفي", "الجامعة");

    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::UnknownStart));
    assert_eq!(
        result.unresolved_suggestions.first().map(String::as_str),
        Some("المستشفى العام - الشرق")
    );
}

#[test]
fn unknown_end_keeps_resolved_start() {
    let f = city();
    let result = f.resolver().resolve("الجامعة", "Atlantis");

    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::UnknownEnd));
    assert_eq!(result.start.as_deref(), Some("الجامعة"));
}

#[test]
fn empty_input_is_an_error() {
    let f = city();
    for (start, end) in [("", "الجامعة"), ("الجامعة", "  "), ("", "")] {
        let result = f.resolver().resolve(start, end);
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.reason, Some(Reason::MissingInput));
    }
}

// ============================================================================
// Free-text resolution
// ============================================================================

#[test]
fn text_query_resolves_route() {
    let f = city();
    let result = f
        .resolver()
        .resolve_from_text("من المستشفى العام إلى الجامعة");

    assert_eq!(result.status, Status::DirectFound);
    assert_eq!(result.start.as_deref(), Some("المستشفى العام"));
    assert_eq!(result.end.as_deref(), Some("الجامعة"));
}

#[test]
fn text_query_tolerates_missing_articles() {
    let f = city();
    let result = f
        .resolver()
        .resolve_from_text("إزاي أروح من مستشفى عام لـ الجامعة؟");

    assert_eq!(result.status, Status::DirectFound);
    assert_eq!(result.start.as_deref(), Some("المستشفى العام"));
}

#[test]
fn text_naming_one_place_twice_is_self_match() {
    let f = city();
    let result = f.resolver().resolve_from_text("من الجامعة إلى الجامعة");
    assert_eq!(result.status, Status::SelfMatch);
}

#[test]
fn destination_only_is_partial_match() {
    let f = city();
    let result = f.resolver().resolve_from_text("إزاي أروح الجامعة؟");

    assert_eq!(result.status, Status::PartialMatch);
    assert_eq!(result.start, None);
    assert_eq!(result.end.as_deref(), Some("الجامعة"));
    assert_eq!(result.reason, None);
}

#[test]
fn one_unresolved_phrase_is_partial_match_with_reason() {
    let f = city();
    let result = f.resolver().resolve_from_text("من الجامعة إلى qqqqqqqq");

    assert_eq!(result.status, Status::PartialMatch);
    assert_eq!(result.start.as_deref(), Some("الجامعة"));
    assert_eq!(result.end, None);
    assert_eq!(result.reason, Some(Reason::UnresolvedPhrase));
}

#[test]
fn unparseable_text_is_ambiguous() {
    let f = city();
    let result = f.resolver().resolve_from_text("مرحبا");

    assert_eq!(result.status, Status::Error);
    assert_eq!(result.reason, Some(Reason::AmbiguousQuery));
}

#[test]
fn unresolved_phrases_are_not_found() {
    let f = city();
    let result = f.resolver().resolve_from_text("من xyzxyz إلى qqqq");

    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.reason, Some(Reason::UnresolvedPhrase));
}

#[test]
fn blank_text_is_missing_input() {
    let f = city();
    let result = f.resolver().resolve_from_text("   ");
    assert_eq!(result.reason, Some(Reason::MissingInput));
}

// ============================================================================
// Landmark search
// ============================================================================

#[test]
fn search_combines_fuzzy_and_substring() {
    let f = city();
    let lines = f.resolver().search_landmarks("الجامعه", 5);
    assert_eq!(lines.first().map(String::as_str), Some("الجامعة - الشرق"));

    let lines = f.resolver().search_landmarks("ميناء", 5);
    assert!(lines.contains(&"الميناء - العرب".to_string()));

    assert!(f.resolver().search_landmarks("الجامعة", 0).is_empty());
}

#[test]
fn text_reply_renders_transfers() {
    let f = Fixture::new(
        vec![landmark("A", "n"), landmark("E", "n")],
        vec![
            route("R1", "5 جنيه", &["A", "B", "C", "D"]),
            route("R2", "3 جنيه", &["B", "C", "D", "E"]),
        ],
        vec![],
    );

    let result = f.resolver().resolve("A", "E");
    assert_eq!(result.status, Status::TransferFound);
    assert_eq!(result.transfers().next().unwrap().transfer_points, vec!["B", "C", "D"]);

    let text = render_text(&result, f.config.transfer_points_shown);
    assert!(text.contains("نقاط التبديل: B، C\n"));
}

// ============================================================================
// Property tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const NAMES: &[&str] = &["المستشفى العام", "الجامعة", "الميناء", "مكان مجهول", ""];

    proptest! {
        /// Repeated queries on one snapshot give identical results, and every
        /// direct suggestion boards before it alights.
        #[test]
        fn resolution_is_deterministic(
            start in proptest::sample::select(NAMES),
            end in proptest::sample::select(NAMES),
        ) {
            let f = city();
            let first = f.resolver().resolve(start, end);
            let second = f.resolver().resolve(start, end);
            prop_assert_eq!(&first, &second);

            for route in first.direct_routes() {
                prop_assert!(route.boarding_index < route.alighting_index);
            }
            if first.status == Status::DirectFound {
                prop_assert!(first.suggestions.iter().all(|s| s.as_direct().is_some()));
            }
        }

        #[test]
        fn text_resolution_is_deterministic(text in "[ a-zمنإلىالجامعةميناء]{0,30}") {
            let f = city();
            prop_assert_eq!(
                f.resolver().resolve_from_text(&text),
                f.resolver().resolve_from_text(&text)
            );
        }
    }
}
