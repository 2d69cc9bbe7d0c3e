use crate::models::QuizResult;

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d %H:%M";

/// Human-friendly local date for the admin table. Falls back to the raw
/// stored text when it is not a valid timestamp.
pub fn format_result_date(result: &QuizResult) -> String {
    let Some(timestamp) = result.timestamp() else {
        return result.date.clone();
    };
    let datetime = timestamp.with_timezone(&chrono::Local);

    let today = chrono::Local::now();
    let result_date = datetime.date_naive();

    if result_date == today.date_naive() {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if result_date == today.date_naive() - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}
