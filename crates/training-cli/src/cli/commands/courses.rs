//! Course list command handler.

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{ContentArrangement, Table};
use training_core::Clients;
use training_core::api::{ANONYMOUS_EMID, CourseQuery, DateWindow};
use training_core::models::Course;

/// Lists the backend can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CourseList {
    Upcoming,
    Registered,
    Attended,
    Delivered,
}

pub struct CoursesOptions<'a> {
    pub list: CourseList,
    pub emid: Option<&'a str>,
    pub json: bool,
    pub upcoming_window_hours: u32,
}

fn query(options: &CoursesOptions<'_>) -> Result<CourseQuery> {
    let emid = options
        .emid
        .map(str::trim)
        .filter(|emid| !emid.is_empty())
        .map(str::to_string);

    let personal = |emid: Option<String>| {
        emid.context("Personal course lists need an employee id (--emid)")
    };
    Ok(match options.list {
        CourseList::Upcoming => CourseQuery::Upcoming {
            window: DateWindow::starting_now(options.upcoming_window_hours),
            emid: emid.unwrap_or_else(|| ANONYMOUS_EMID.to_string()),
        },
        CourseList::Registered => CourseQuery::Registered {
            emid: personal(emid)?,
        },
        CourseList::Attended => CourseQuery::Attended {
            emid: personal(emid)?,
        },
        CourseList::Delivered => CourseQuery::Delivered {
            emid: personal(emid)?,
        },
    })
}

pub async fn run(clients: &Clients, options: &CoursesOptions<'_>) -> Result<()> {
    let query = query(options)?;
    let label = query.label();
    let courses = clients
        .api
        .courses(query)
        .await
        .with_context(|| format!("fetch {label} courses"))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
    } else if courses.is_empty() {
        println!("No courses.");
    } else {
        println!("{}", table(&courses));
    }
    Ok(())
}

fn table(courses: &[Course]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Id", "Topic", "Program", "Date", "Time", "Room", "Trainers"]);

    for course in courses {
        table.add_row([
            course.id.to_string(),
            course.topic_name.clone(),
            course.program_name.clone(),
            course
                .delivery_date
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string(),
            format!("{}-{}", course.start_time, course.end_time),
            course.meeting_room.clone().unwrap_or_default(),
            course.trainer_names().join(", "),
        ]);
    }
    table
}
