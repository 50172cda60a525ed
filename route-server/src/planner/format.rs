//! User-facing Arabic messages and plain-text replies.

use std::fmt::Write;

use crate::domain::Proximity;

use super::result::{ResolutionResult, RouteSuggestion, Status, TransferSuggestion};

pub(crate) fn missing_input() -> String {
    "❌ الرجاء تحديد نقطة البداية والوجهة.".to_string()
}

pub(crate) fn self_match(name: &str) -> String {
    format!("✅ أنت بالفعل في وجهتك أو قريب جداً منها: '{name}'!")
}

pub(crate) fn unknown_start(name: &str) -> String {
    format!("❌ عذراً، لم أتمكن من العثور على بيانات لنقطة البداية '{name}'.")
}

pub(crate) fn unknown_end(name: &str) -> String {
    format!("❌ عذراً، لم أتمكن من العثور على بيانات لنقطة النهاية '{name}'.")
}

pub(crate) fn direct_found(count: usize) -> String {
    format!("✅ تم العثور على {count} خط مباشر.")
}

pub(crate) fn transfer_found(count: usize) -> String {
    format!("🔄 لا يوجد خط مباشر، لكن وجدت {count} مسار بتبديل.")
}

pub(crate) fn no_common_route(start: &str, end: &str) -> String {
    format!(
        "❌ عذراً، لم أجد مساراً بين '{start}' و '{end}'. لا يوجد خط يخدم المكانين معاً بدرجة قرب مقبولة."
    )
}

pub(crate) fn no_valid_sequence(start: &str, end: &str) -> String {
    format!(
        "❌ عذراً، لم أجد مساراً بين '{start}' و '{end}'. الخطوط المشتركة لا تمر بالمكانين بالترتيب الصحيح."
    )
}

pub(crate) fn ambiguous_query() -> String {
    "لم أتمكن من فهم طلبك. جرب مثلاً: \"إزاي أروح من المستشفى العام لـ الجامعة؟\"".to_string()
}

pub(crate) fn unresolved_phrase(phrase: &str) -> String {
    format!("❌ لم أتعرف على المكان '{phrase}'.")
}

pub(crate) fn partial_match(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(start), None) => {
            format!("📍 تعرفت على نقطة البداية '{start}'. إلى أين تريد الذهاب؟")
        }
        (None, Some(end)) => {
            format!("🏁 تعرفت على الوجهة '{end}'. من أين ستبدأ؟")
        }
        _ => "تعرفت على جزء من طلبك فقط.".to_string(),
    }
}

/// Render a whole result as a chat-style reply.
///
/// Transfer suggestions list at most `transfer_points_shown` transfer points.
pub fn render_text(result: &ResolutionResult, transfer_points_shown: usize) -> String {
    let mut out = result.message.clone();

    match result.status {
        Status::DirectFound => {
            for route in result.direct_routes() {
                out.push_str("\n\n---\n\n");
                write_direct(&mut out, route, result);
            }
            out.push_str(
                "\n\n**ملاحظة:** دقة أماكن الركوب/النزول تعتمد على البيانات الحالية. يمكنك دائماً سؤال السائق للتأكيد.",
            );
        }
        Status::TransferFound => {
            out.push_str("\n\n");
            for (i, transfer) in result.transfers().enumerate() {
                write_transfer(&mut out, i + 1, transfer, transfer_points_shown);
            }
            out.push_str("📝 **ملاحظة:** قد تحتاج لسؤال السائق عن أفضل نقاط التبديل.");
        }
        _ => {}
    }

    if !result.unresolved_suggestions.is_empty() {
        out.push_str("\n\n💡 هل تقصد:");
        for line in &result.unresolved_suggestions {
            let _ = write!(out, "\n• {line}");
        }
    }

    out
}

fn write_direct(out: &mut String, route: &RouteSuggestion, result: &ResolutionResult) {
    let start = result.start.as_deref().unwrap_or("?");
    let end = result.end.as_deref().unwrap_or("?");

    let _ = write!(out, "✅ خط مباشر مقترح: **'{}'**", route.route_name);
    let _ = write!(
        out,
        "\n  - للركوب: اذهب إلى **'{}'** (يعتبر '{}' من '{start}').",
        route.boarding_stop,
        route.start_proximity.label()
    );
    let _ = write!(out, "\n  - النزول: انزل عند **'{}'**.", route.alighting_stop);
    match route.end_proximity {
        Proximity::VeryNear => {
            let _ = write!(out, "\n  - وجهتك **'{end}'** ستكون قريبة جداً من مكان نزولك.");
        }
        Proximity::Medium => {
            let _ = write!(
                out,
                "\n  - وجهتك **'{end}'** ستكون على مسافة متوسطة من مكان نزولك (قد تحتاج لمشي بسيط)."
            );
        }
        Proximity::Far => {}
    }
    let _ = write!(out, "\n  - الأجرة التقريبية: {}", route.fare);
    if let Some(notes) = &route.notes {
        let _ = write!(out, "\n  - ملاحظات: {notes}");
    }
}

fn write_transfer(out: &mut String, n: usize, transfer: &TransferSuggestion, shown: usize) {
    let points: Vec<&str> = transfer
        .transfer_points
        .iter()
        .take(shown)
        .map(String::as_str)
        .collect();

    let _ = writeln!(
        out,
        "{n}. **{}** ← **{}**",
        transfer.first_route, transfer.second_route
    );
    let _ = writeln!(out, "   🔄 نقاط التبديل: {}", points.join("، "));
    let _ = writeln!(out, "   💰 التعريفة: {}\n", transfer.combined_fare);
}
