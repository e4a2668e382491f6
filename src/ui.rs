use crate::calendar::{AttendanceStatus, CalendarCell};
use crate::models::{CalendarResponse, Employee, RecordPoint};
use crate::stats::TodayOverview;
use crate::view::{DashboardTab, ViewState};
use std::fmt::Write;

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_dashboard(
    view: &ViewState,
    employees: &[Employee],
    calendar: &CalendarResponse,
    records: &[RecordPoint],
    today: &TodayOverview,
) -> String {
    let body = match view.tab {
        DashboardTab::Calendar => render_grid(&calendar.cells),
        DashboardTab::Records => render_records(records),
    };

    let employee_name = employees
        .iter()
        .find(|employee| employee.id == view.employee_id)
        .map(|employee| employee.name.as_str())
        .unwrap_or("");

    DASHBOARD_HTML
        .replace("{{TODAY}}", &today.date)
        .replace("{{HEADCOUNT}}", &today.headcount.to_string())
        .replace("{{TODAY_PRESENT}}", &(today.present + today.late).to_string())
        .replace("{{TODAY_PENDING}}", &today.not_checked_in.to_string())
        .replace(
            "{{EMPLOYEE_OPTIONS}}",
            &render_employee_options(employees, &view.employee_id),
        )
        .replace("{{EMPLOYEE_ID}}", &escape(&view.employee_id))
        .replace("{{EMPLOYEE_NAME}}", &escape(employee_name))
        .replace("{{MONTH_TITLE}}", &format!("{} {}", calendar.month_name, calendar.year))
        .replace("{{PREV_LINK}}", &format!("/?{}&nav=prev", escape(&view.query())))
        .replace("{{NEXT_LINK}}", &format!("/?{}&nav=next", escape(&view.query())))
        .replace("{{TABS}}", &render_tabs(view))
        .replace("{{SUMMARY}}", &render_summary(calendar))
        .replace("{{BODY}}", &body)
}

fn render_employee_options(employees: &[Employee], selected: &str) -> String {
    let mut html = String::new();
    for employee in employees {
        let _ = write!(
            html,
            r#"<option value="{id}"{sel}>{initials} · {name} ({department})</option>"#,
            id = escape(&employee.id),
            sel = if employee.id == selected { " selected" } else { "" },
            initials = escape(&employee.initials()),
            name = escape(&employee.name),
            department = escape(&employee.department),
        );
    }
    html
}

fn render_tabs(view: &ViewState) -> String {
    let mut html = String::new();
    for (tab, label) in [(DashboardTab::Calendar, "Calendar"), (DashboardTab::Records, "Records")] {
        let mut target = view.clone();
        target.tab = tab;
        let _ = write!(
            html,
            r#"<a class="tab{active}" href="/?{query}">{label}</a>"#,
            active = if view.tab == tab { " active" } else { "" },
            query = escape(&target.query()),
        );
    }
    html
}

fn render_summary(calendar: &CalendarResponse) -> String {
    let summary = &calendar.summary;
    let mut html = String::new();
    for status in [
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
        AttendanceStatus::Leave,
    ] {
        let _ = write!(
            html,
            concat!(
                r#"<div class="stat {class}"><span class="label">{label}</span>"#,
                r#"<span class="value">{count}</span></div>"#,
            ),
            class = status.as_str(),
            label = status.label(),
            count = summary.count(status),
        );
    }
    let _ = write!(
        html,
        concat!(
            r#"<div class="stat"><span class="label">Attendance</span>"#,
            r#"<span class="value net">{rate:.1}%</span></div>"#,
        ),
        rate = calendar.attendance_rate,
    );
    html
}

fn render_grid(cells: &[CalendarCell]) -> String {
    let mut html = String::from(r#"<div class="grid">"#);
    for header in WEEKDAY_HEADERS {
        let _ = write!(html, r#"<div class="weekday">{header}</div>"#);
    }
    for cell in cells {
        match cell {
            CalendarCell::Blank => html.push_str(r#"<div class="cell blank"></div>"#),
            CalendarCell::Day { day, status } => {
                let _ = write!(
                    html,
                    r#"<div class="cell {class}" title="{label}"><span>{day}</span></div>"#,
                    class = status.as_str(),
                    label = status.label(),
                );
            }
        }
    }
    html.push_str("</div>");
    html
}

fn render_records(records: &[RecordPoint]) -> String {
    if records.is_empty() {
        return r#"<p class="hint">No attendance recorded this month.</p>"#.to_string();
    }

    let mut html = String::from(concat!(
        r#"<table class="records"><thead>"#,
        r#"<tr><th>Date</th><th>Day</th><th>Status</th></tr>"#,
        r#"</thead><tbody>"#,
    ));
    for record in records.iter().rev() {
        let _ = write!(
            html,
            concat!(
                r#"<tr><td>{date}</td><td>{weekday}</td>"#,
                r#"<td><span class="badge {class}">{label}</span></td></tr>"#,
            ),
            date = record.date,
            weekday = record.weekday,
            class = record.status.as_str(),
            label = record.status.label(),
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f8;
      --ink: #1f2a37;
      --accent: #2563eb;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
      --present: #22c55e;
      --late: #f59e0b;
      --absent: #ef4444;
      --leave: #8b5cf6;
      --weekend: #cbd5e1;
      --unknown: #f1f5f9;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #f8fafc 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f6b7a;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7b8794;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.net {
      color: var(--accent);
    }

    .stat.present { border-left: 4px solid var(--present); }
    .stat.late { border-left: 4px solid var(--late); }
    .stat.absent { border-left: 4px solid var(--absent); }
    .stat.leave { border-left: 4px solid var(--leave); }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
      justify-content: space-between;
    }

    select, button {
      font: inherit;
      border-radius: 999px;
      padding: 10px 16px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button {
      background: var(--accent);
      color: white;
      border: none;
      font-weight: 600;
      cursor: pointer;
    }

    .month-nav {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .month-nav a {
      text-decoration: none;
      color: var(--accent-2);
      font-size: 1.3rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
      color: #6b645d;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      text-align: center;
      font-size: 0.8rem;
      color: #7b8794;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 14px;
      display: grid;
      place-items: center;
      font-weight: 600;
    }

    .cell.blank { background: transparent; }
    .cell.present, .badge.present { background: var(--present); color: white; }
    .cell.late, .badge.late { background: var(--late); color: white; }
    .cell.absent, .badge.absent { background: var(--absent); color: white; }
    .cell.leave, .badge.leave { background: var(--leave); color: white; }
    .cell.weekend, .badge.weekend { background: var(--weekend); }
    .cell.unknown, .badge.unknown { background: var(--unknown); color: #94a3b8; }

    .records {
      width: 100%;
      border-collapse: collapse;
    }

    .records th, .records td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .badge {
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.85rem;
    }

    .hint {
      margin: 0;
      color: #6f7a85;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Attendance</h1>
      <p class="subtitle">Team overview for {{TODAY}}.</p>
    </header>

    <section class="panel">
      <div class="stat"><span class="label">Headcount</span><span class="value">{{HEADCOUNT}}</span></div>
      <div class="stat"><span class="label">Checked in</span><span class="value net">{{TODAY_PRESENT}}</span></div>
      <div class="stat"><span class="label">Not checked in</span><span class="value">{{TODAY_PENDING}}</span></div>
    </section>

    <section class="toolbar">
      <form method="get" action="/">
        <select name="employee" onchange="this.form.submit()">{{EMPLOYEE_OPTIONS}}</select>
      </form>
      <form method="post" action="/check-in">
        <input type="hidden" name="employee_id" value="{{EMPLOYEE_ID}}" />
        <button type="submit">Face check-in for {{EMPLOYEE_NAME}}</button>
      </form>
    </section>

    <section class="toolbar">
      <div class="month-nav">
        <a href="{{PREV_LINK}}" aria-label="Previous month">&lsaquo;</a>
        <h2>{{MONTH_TITLE}}</h2>
        <a href="{{NEXT_LINK}}" aria-label="Next month">&rsaquo;</a>
      </div>
      <nav class="tabs">{{TABS}}</nav>
    </section>

    <section class="panel">{{SUMMARY}}</section>

    <section>{{BODY}}</section>

    <p class="hint">Weekends and days without a record are left out of the attendance rate.</p>
  </main>
</body>
</html>
"#;
