use crate::store::PeriodType;
use crate::view::{CalendarCell, CalendarSnapshot};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn render_index(snapshot: &CalendarSnapshot, calendars: &[(String, String)]) -> String {
    let body = INDEX_BODY
        .replace("{{TITLE}}", &escape(&snapshot.title))
        .replace("{{STREAK}}", &streak_line(snapshot))
        .replace("{{CONTROLS}}", &controls(snapshot))
        .replace("{{GRID}}", &grid(snapshot))
        .replace("{{CALENDARS}}", &calendar_list(snapshot, calendars));
    page(&escape(&snapshot.title), &body)
}

pub fn render_empty() -> String {
    page("Goal Tracker", EMPTY_BODY)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <main class="app">
{body}
  </main>
</body>
</html>"#
    )
}

fn streak_line(snapshot: &CalendarSnapshot) -> String {
    if !snapshot.show_streak {
        return String::new();
    }
    let unit = snapshot.period_type.unit();
    let plural = if snapshot.streak == 1 { "" } else { "s" };
    format!(
        r#"<p class="streak">Current streak: {} {unit}{plural}</p>"#,
        snapshot.streak
    )
}

fn controls(snapshot: &CalendarSnapshot) -> String {
    let id = &snapshot.id;
    let (prev, next, label) = match snapshot.period_type {
        PeriodType::Monthly => (
            format!("/?id={id}&year={}", snapshot.year - 1),
            format!("/?id={id}&year={}", snapshot.year + 1),
            snapshot.year.to_string(),
        ),
        _ => {
            let (prev_year, prev_month) = if snapshot.month == 1 {
                (snapshot.year - 1, 12)
            } else {
                (snapshot.year, snapshot.month - 1)
            };
            let (next_year, next_month) = if snapshot.month == 12 {
                (snapshot.year + 1, 1)
            } else {
                (snapshot.year, snapshot.month + 1)
            };
            (
                format!("/?id={id}&year={prev_year}&month={prev_month}"),
                format!("/?id={id}&year={next_year}&month={next_month}"),
                format!(
                    "{} {}",
                    MONTH_NAMES[(snapshot.month - 1) as usize],
                    snapshot.year
                ),
            )
        }
    };

    format!(
        r#"<a class="nav" href="{prev}">&larr;</a><span class="period">{label}</span><a class="nav" href="{next}">&rarr;</a>"#
    )
}

fn grid(snapshot: &CalendarSnapshot) -> String {
    match snapshot.period_type {
        PeriodType::Daily => daily_grid(snapshot),
        PeriodType::Weekly => weekly_rows(snapshot),
        PeriodType::Monthly => monthly_grid(snapshot),
    }
}

fn daily_grid(snapshot: &CalendarSnapshot) -> String {
    let mut out = String::from(r#"<div class="calendar daily">"#);
    for day in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        out.push_str(&format!(r#"<div class="header">{day}</div>"#));
    }
    for _ in 0..snapshot.leading_blanks {
        out.push_str(r#"<div class="blank"></div>"#);
    }
    for cell in &snapshot.cells {
        out.push_str(&cell_button(snapshot, cell));
    }
    out.push_str("</div>");
    out
}

fn weekly_rows(snapshot: &CalendarSnapshot) -> String {
    let mut out = String::from(r#"<div class="calendar weekly">"#);
    for cell in &snapshot.cells {
        let detail = cell.detail.as_deref().unwrap_or("");
        out.push_str(&format!(
            r#"<div class="week-row"><div class="week-info"><span class="week-number">{}</span><span class="week-dates">{}</span></div>{}</div>"#,
            escape(&cell.label),
            escape(detail),
            marker_button(snapshot, cell),
        ));
    }
    out.push_str("</div>");
    out
}

fn monthly_grid(snapshot: &CalendarSnapshot) -> String {
    let mut out = String::from(r#"<div class="calendar monthly">"#);
    for cell in &snapshot.cells {
        out.push_str(&cell_button(snapshot, cell));
    }
    out.push_str("</div>");
    out
}

fn cell_button(snapshot: &CalendarSnapshot, cell: &CalendarCell) -> String {
    format!(
        r#"<form method="post" action="{}"><button type="submit" class="cell{}">{}</button></form>"#,
        toggle_action(snapshot, cell),
        completed_class(cell),
        escape(&cell.label),
    )
}

fn marker_button(snapshot: &CalendarSnapshot, cell: &CalendarCell) -> String {
    format!(
        r#"<form method="post" action="{}"><button type="submit" class="cell marker{}" aria-label="{}"></button></form>"#,
        toggle_action(snapshot, cell),
        completed_class(cell),
        escape(&cell.label),
    )
}

fn toggle_action(snapshot: &CalendarSnapshot, cell: &CalendarCell) -> String {
    format!(
        "/toggle/{}/{}?year={}&month={}",
        snapshot.id, cell.key, snapshot.year, snapshot.month
    )
}

fn completed_class(cell: &CalendarCell) -> &'static str {
    if cell.completed { " completed" } else { "" }
}

fn calendar_list(snapshot: &CalendarSnapshot, calendars: &[(String, String)]) -> String {
    let mut out = String::from(r#"<nav class="calendars">"#);
    for (id, title) in calendars {
        let active = if *id == snapshot.id { " active" } else { "" };
        out.push_str(&format!(
            r#"<a class="calendar-link{active}" href="/?id={id}">{}</a>"#,
            escape(title)
        ));
    }
    out.push_str(CREATE_FORM);
    out.push_str("</nav>");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CREATE_FORM: &str = r#"<details class="new-calendar"><summary>New calendar</summary>
<form method="post" action="/calendars">
  <input name="title" placeholder="Title" />
  <select name="type">
    <option value="daily">Daily</option>
    <option value="weekly">Weekly</option>
    <option value="monthly">Monthly</option>
  </select>
  <label><input type="checkbox" name="streak" value="on" /> Show streak</label>
  <button type="submit">Create</button>
</form></details>"#;

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --done: #7fb069;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 20px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 3vw, 2.4rem);
      margin: 0;
    }

    .streak {
      margin: 0;
      color: var(--accent);
      font-weight: 600;
    }

    .controls {
      display: flex;
      align-items: center;
      gap: 16px;
    }

    .controls .nav {
      text-decoration: none;
      color: var(--accent-2);
      font-size: 1.3rem;
    }

    .controls .period {
      font-weight: 600;
    }

    .calendar.daily,
    .calendar.monthly {
      display: grid;
      gap: 8px;
    }

    .calendar.daily {
      grid-template-columns: repeat(7, 1fr);
    }

    .calendar.monthly {
      grid-template-columns: repeat(4, 1fr);
    }

    .calendar .header {
      text-align: center;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    .calendar form {
      display: contents;
    }

    .cell {
      width: 100%;
      padding: 10px 0;
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 12px;
      background: white;
      color: var(--ink);
      font: inherit;
      cursor: pointer;
    }

    .cell.completed {
      background: var(--done);
      border-color: var(--done);
      color: white;
    }

    .calendar.weekly {
      display: grid;
      gap: 10px;
    }

    .week-row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .week-info {
      display: grid;
    }

    .week-number {
      font-weight: 600;
    }

    .week-dates {
      color: #8b857d;
      font-size: 0.85rem;
    }

    .cell.marker {
      width: 44px;
      height: 44px;
      padding: 0;
      border-radius: 50%;
    }

    .calendars {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      border-top: 1px solid rgba(47, 72, 88, 0.12);
      padding-top: 16px;
    }

    .calendar-link {
      color: var(--accent-2);
      text-decoration: none;
      padding: 4px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.12);
    }

    .calendar-link.active {
      background: var(--accent-2);
      color: white;
    }

    .new-calendar form {
      display: grid;
      gap: 8px;
      padding-top: 8px;
    }
"#;

const INDEX_BODY: &str = r#"  <header>
    <h1>{{TITLE}}</h1>
    {{STREAK}}
  </header>
  <div class="controls">{{CONTROLS}}</div>
  {{GRID}}
  {{CALENDARS}}"#;

const EMPTY_BODY: &str = r#"  <header>
    <h1>Goal Tracker</h1>
    <p>No calendars yet. Create one to start tracking.</p>
  </header>
  <form method="post" action="/calendars" class="new-calendar">
    <input name="title" placeholder="Title" />
    <select name="type">
      <option value="daily">Daily</option>
      <option value="weekly">Weekly</option>
      <option value="monthly">Monthly</option>
    </select>
    <label><input type="checkbox" name="streak" value="on" /> Show streak</label>
    <button type="submit">Create</button>
  </form>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GoalStore;
    use crate::view::build_snapshot;
    use chrono::NaiveDate;

    fn snapshot() -> CalendarSnapshot {
        let mut store = GoalStore::new(PeriodType::Daily, "Water", true);
        store.goals.insert("2024-03-05".to_string(), true);
        store.goals.insert("2024-03-04".to_string(), true);
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        build_snapshot(&store, 2024, 3, today).unwrap()
    }

    #[test]
    fn index_page_contains_grid_and_streak() {
        let snapshot = snapshot();
        let html = render_index(&snapshot, &[(snapshot.id.clone(), "Water".to_string())]);
        assert!(html.contains("Current streak: 2 days"));
        assert!(html.contains("2024-03-05"));
        assert!(html.contains("class=\"cell completed\""));
        assert!(html.contains("March 2024"));
    }

    #[test]
    fn titles_are_html_escaped() {
        let mut snapshot = snapshot();
        snapshot.title = "<b>Water</b>".to_string();
        let html = render_index(&snapshot, &[]);
        assert!(html.contains("&lt;b&gt;Water&lt;/b&gt;"));
        assert!(!html.contains("<b>Water</b>"));
    }
}
