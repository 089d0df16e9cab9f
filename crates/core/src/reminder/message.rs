use std::fmt::Write;
use weekfitter_notifier_domain::CalendarEvent;

const START_FORMAT: &str = "%-d %B %Y at %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEmail {
    pub subject: String,
    pub body: String,
}

/// Renders the plain text email a `User` receives for a due reminder of `event`
pub fn format_reminder_email(event: &CalendarEvent) -> ReminderEmail {
    let mut body = String::from("Reminder of your upcoming activity:\n\n");
    // Writing to a String cannot fail
    let _ = writeln!(body, "Title: {}", event.title);
    let _ = writeln!(
        body,
        "Description: {}",
        event.description.as_deref().unwrap_or("—")
    );
    let _ = writeln!(body, "Category: {}", event.category);
    if let Some(sport_type) = event.sport_type {
        let _ = writeln!(body, "Sport type: {}", sport_type);
    }
    if let Some(distance) = event.distance {
        let _ = writeln!(body, "Distance: {} km", distance);
    }
    if let Some(duration) = event.duration {
        let _ = writeln!(body, "Duration: {} min", duration);
    }
    match event.start_time {
        Some(start) => {
            let _ = write!(body, "\nStarts: {}", start.format(START_FORMAT));
        }
        None => body.push_str("\nStarts: not scheduled"),
    }

    ReminderEmail {
        subject: format!("Reminder: {}", event.title),
        body,
    }
}
