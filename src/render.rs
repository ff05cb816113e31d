use crate::model::{Department, Student};
use crate::session::{ListView, Page, Session, TeacherDashboard};
use crate::workflow::{present_in_class, students_in_class};
use serde_json::json;
use std::path::Path;

pub const APP_TITLE: &str = "MCKVIAN: Smart Attendance System";

fn logo_json(logo: &Path, warnings: &mut Vec<String>) -> serde_json::Value {
    match std::fs::metadata(logo) {
        Ok(m) if m.is_file() => json!({
            "path": logo.to_string_lossy(),
            "found": true,
            "sizeBytes": m.len(),
        }),
        _ => {
            let file_name = logo
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| logo.to_string_lossy().to_string());
            warnings.push(format!(
                "Logo image not found. Please ensure '{}' is in the same directory.",
                file_name
            ));
            json!({
                "path": logo.to_string_lossy(),
                "found": false,
                "sizeBytes": null,
            })
        }
    }
}

fn list_table(students: &[Student], class: Department, view: ListView) -> serde_json::Value {
    let (title, columns) = match view {
        ListView::Hidden => return serde_json::Value::Null,
        ListView::Present => (
            format!("Present Students in {}", class),
            json!(["Roll Number", "Name"]),
        ),
        ListView::All => (
            format!("All Students in {}", class),
            json!(["Roll Number", "Name", "Attendance Status"]),
        ),
    };
    if students.is_empty() {
        return json!({
            "title": title,
            "columns": columns,
            "rows": [],
            "info": "No student data available.",
        });
    }
    let rows: Vec<serde_json::Value> = match view {
        ListView::Present => present_in_class(students, class)
            .map(|s| json!({ "Roll Number": s.roll_number, "Name": s.name }))
            .collect(),
        _ => students_in_class(students, class)
            .map(|s| {
                json!({
                    "Roll Number": s.roll_number,
                    "Name": s.name,
                    "Attendance Status": s.attendance.label(),
                })
            })
            .collect(),
    };
    let info = if !rows.is_empty() {
        serde_json::Value::Null
    } else if view == ListView::Present {
        json!(format!("No students marked 'Present' in {} yet.", class))
    } else {
        json!(format!("No students found in {}.", class))
    };
    json!({
        "title": title,
        "columns": columns,
        "rows": rows,
        "info": info,
    })
}

fn teacher_fields(dash: &TeacherDashboard, students: &[Student]) -> serde_json::Value {
    let table = match dash.selected_class {
        Some(class) => list_table(students, class, dash.list),
        None => serde_json::Value::Null,
    };
    json!({
        "classOptions": Department::ALL.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
        "selectedClass": dash.selected_class.map(|d| d.as_str()),
        "message": dash.message,
        "listView": dash.list.as_str(),
        "table": table,
        "lastScanAt": dash.last_scan_at.map(|t| t.to_rfc3339()),
    })
}

/// Renders the session's current page. A student dashboard whose record is
/// gone from the store sends the session back to login.
pub fn render(session: &mut Session, students: Option<&[Student]>, logo: &Path) -> serde_json::Value {
    let orphaned = match &session.page {
        Page::StudentDashboard { roll } => {
            let known = students
                .map(|all| all.iter().any(|s| &s.roll_number == roll))
                .unwrap_or(false);
            (!known).then(|| roll.clone())
        }
        _ => None,
    };
    if let Some(roll) = orphaned {
        tracing::warn!(roll = %roll, "student dashboard without a record, redirecting");
        session.warnings.push("Please log in first.".to_string());
        session.go(Page::Login);
    }

    let (notice, mut warnings) = session.take_flash();
    let logo = logo_json(logo, &mut warnings);
    let all = students.unwrap_or(&[]);

    let (header, extra) = match &session.page {
        Page::Login => (None, json!({})),
        Page::TeacherDashboard(dash) => (Some("Teacher Dashboard"), teacher_fields(dash, all)),
        Page::StudentLogin => (
            Some("Student Login"),
            json!({
                "fields": ["name", "rollNumber", "department"],
                "departmentOptions": Department::ALL.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
            }),
        ),
        Page::StudentDashboard { roll } => {
            let student = all.iter().find(|s| &s.roll_number == roll).map(|s| {
                json!({
                    "name": s.name,
                    "rollNumber": s.roll_number,
                    "department": s.department.as_str(),
                    "attendance": s.attendance.label(),
                })
            });
            (Some("Student Dashboard"), json!({ "student": student }))
        }
    };

    let mut view = json!({
        "page": session.page.name(),
        "title": APP_TITLE,
        "header": header,
        "logo": logo,
        "warnings": warnings,
        "notice": notice,
        "actions": session.page.actions().iter().map(|a| a.method()).collect::<Vec<_>>(),
    });
    if let (Some(obj), Some(fields)) = (view.as_object_mut(), extra.as_object()) {
        for (k, v) in fields {
            obj.insert(k.clone(), v.clone());
        }
    }
    view
}
