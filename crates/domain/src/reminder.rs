use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A `Reminder` represents a specific time before the start of a
/// `CalendarEvent` at which the owner `User` should be notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `CalendarEvent` this `Reminder` is associated with.
    /// A `Reminder` never outlives its event.
    pub event_id: ID,
    /// The `User` which should receive the email at `remind_at`
    pub user_id: ID,
    /// The wall clock time (application time zone) at which the `User`
    /// should be notified
    pub remind_at: NaiveDateTime,
    /// Goes from `false` to `true` exactly once and never back
    pub sent: bool,
    /// Display category for well known offsets
    pub kind: Option<ReminderKind>,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    pub fn new(
        event_id: ID,
        user_id: ID,
        remind_at: NaiveDateTime,
        kind: Option<ReminderKind>,
    ) -> Self {
        Self {
            id: Default::default(),
            event_id,
            user_id,
            remind_at,
            sent: false,
            kind,
        }
    }

    pub fn is_due(&self, now: &NaiveDateTime) -> bool {
        !self.sent && self.remind_at <= *now
    }
}

/// The catalogue of offsets offered to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderKind {
    Minutes5,
    Minutes15,
    Minutes30,
    Hour1,
    Hours2,
    Day1,
    Days2,
    Week1,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 8] = [
        Self::Minutes5,
        Self::Minutes15,
        Self::Minutes30,
        Self::Hour1,
        Self::Hours2,
        Self::Day1,
        Self::Days2,
        Self::Week1,
    ];

    pub fn minutes_before(&self) -> i64 {
        match self {
            Self::Minutes5 => 5,
            Self::Minutes15 => 15,
            Self::Minutes30 => 30,
            Self::Hour1 => 60,
            Self::Hours2 => 120,
            Self::Day1 => 60 * 24,
            Self::Days2 => 60 * 24 * 2,
            Self::Week1 => 60 * 24 * 7,
        }
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.minutes_before() == minutes)
            .copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minutes5 => "5 minutes before",
            Self::Minutes15 => "15 minutes before",
            Self::Minutes30 => "30 minutes before",
            Self::Hour1 => "1 hour before",
            Self::Hours2 => "2 hours before",
            Self::Day1 => "1 day before",
            Self::Days2 => "2 days before",
            Self::Week1 => "1 week before",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes5 => "MINUTES_5",
            Self::Minutes15 => "MINUTES_15",
            Self::Minutes30 => "MINUTES_30",
            Self::Hour1 => "HOUR_1",
            Self::Hours2 => "HOURS_2",
            Self::Day1 => "DAY_1",
            Self::Days2 => "DAYS_2",
            Self::Week1 => "WEEK_1",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().find(|kind| kind.as_str() == value).copied()
    }
}

/// The time at which a reminder `minutes_before` the start should fire.
/// Callers only pass positive offsets. `None` if the result lies outside the
/// representable time range.
pub fn derive_remind_at(start: NaiveDateTime, minutes_before: i64) -> Option<NaiveDateTime> {
    Duration::try_minutes(minutes_before).and_then(|offset| start.checked_sub_signed(offset))
}

/// Moves every reminder along with its event from `old_start` to `new_start`
/// while keeping each reminder's own lead time.
///
/// Reminders that cannot be moved keep their current time. Their ids are
/// returned.
pub fn rebase_reminders(
    reminders: &mut [Reminder],
    old_start: NaiveDateTime,
    new_start: NaiveDateTime,
) -> Vec<ID> {
    let mut unmoved = Vec::new();
    for reminder in reminders.iter_mut() {
        let minutes_before_old_start = (old_start - reminder.remind_at).num_minutes().abs();
        match derive_remind_at(new_start, minutes_before_old_start) {
            Some(remind_at) => reminder.remind_at = remind_at,
            None => unmoved.push(reminder.id),
        }
    }
    unmoved
}

/// Reconstructs the configured offsets (ascending) from stored reminders
pub fn reminder_offsets(start: NaiveDateTime, reminders: &[Reminder]) -> Vec<i64> {
    let mut offsets = reminders
        .iter()
        .map(|r| (start - r.remind_at).num_minutes())
        .filter(|minutes| *minutes > 0)
        .collect::<Vec<_>>();
    offsets.sort_unstable();
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn reminders_for(start: NaiveDateTime, offsets: &[i64]) -> Vec<Reminder> {
        let event_id = ID::default();
        let user_id = ID::default();
        offsets
            .iter()
            .map(|o| {
                Reminder::new(
                    event_id,
                    user_id,
                    derive_remind_at(start, *o).unwrap(),
                    ReminderKind::from_minutes(*o),
                )
            })
            .collect()
    }

    #[test]
    fn remind_at_is_start_minus_offset() {
        let start = dt(1, 10, 0);
        assert_eq!(derive_remind_at(start, 30), Some(dt(1, 9, 30)));
        // Crosses the month boundary
        let day_before = NaiveDate::from_ymd_opt(2025, 5, 31)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(derive_remind_at(start, 60 * 24), Some(day_before));
    }

    #[test]
    fn remind_at_out_of_range_is_none() {
        let start = dt(1, 10, 0);
        assert_eq!(derive_remind_at(start, 10_000_000_000_000), None);
        assert_eq!(derive_remind_at(start, i64::MAX), None);
    }

    #[test]
    fn rebase_leaves_unrepresentable_reminders_in_place() {
        let old_start = dt(1, 10, 0);
        let mut reminders = reminders_for(old_start, &[30]);
        // Far enough before the start that moving it to the earliest
        // representable date underflows
        let far = NaiveDate::from_ymd_opt(-200_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        reminders.push(Reminder::new(ID::default(), ID::default(), far, None));
        let new_start = NaiveDateTime::MIN + Duration::days(1);

        let unmoved = rebase_reminders(&mut reminders, old_start, new_start);

        assert_eq!(unmoved, vec![reminders[1].id]);
        assert_eq!(reminders[1].remind_at, far);
        assert_eq!(reminders[0].remind_at, new_start - Duration::minutes(30));
    }

    #[test]
    fn rebase_keeps_lead_time_when_moving_forward() {
        let old_start = dt(1, 10, 0);
        let new_start = dt(2, 8, 0);
        let mut reminders = reminders_for(old_start, &[30, 60, 1440]);

        rebase_reminders(&mut reminders, old_start, new_start);

        assert_eq!(reminders[0].remind_at, dt(2, 7, 30));
        assert_eq!(reminders[1].remind_at, dt(2, 7, 0));
        assert_eq!(reminders[2].remind_at, dt(1, 8, 0));
    }

    #[test]
    fn rebase_keeps_lead_time_when_moving_backward() {
        let old_start = dt(10, 18, 0);
        let new_start = dt(3, 6, 15);
        let mut reminders = reminders_for(old_start, &[5, 120]);

        rebase_reminders(&mut reminders, old_start, new_start);

        assert_eq!(reminders[0].remind_at, dt(3, 6, 10));
        assert_eq!(reminders[1].remind_at, dt(3, 4, 15));
        assert_eq!(reminder_offsets(new_start, &reminders), vec![5, 120]);
    }

    #[test]
    fn rebase_does_not_touch_sent_flag() {
        let old_start = dt(1, 10, 0);
        let mut reminders = reminders_for(old_start, &[15]);
        reminders[0].sent = true;
        rebase_reminders(&mut reminders, old_start, dt(1, 12, 0));
        assert!(reminders[0].sent);
    }

    #[test]
    fn offsets_are_sorted_and_positive() {
        let start = dt(1, 10, 0);
        let mut reminders = reminders_for(start, &[1440, 15, 60]);
        // A reminder at or after the start is not an offset
        reminders.push(Reminder::new(ID::default(), ID::default(), start, None));
        reminders.push(Reminder::new(ID::default(), ID::default(), dt(1, 11, 0), None));

        assert_eq!(reminder_offsets(start, &reminders), vec![15, 60, 1440]);
    }

    #[test]
    fn kinds_map_to_minutes_and_back() {
        for kind in ReminderKind::ALL.iter() {
            assert_eq!(
                ReminderKind::from_minutes(kind.minutes_before()),
                Some(*kind)
            );
            assert_eq!(ReminderKind::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(ReminderKind::from_minutes(42), None);
        assert_eq!(ReminderKind::Hour1.label(), "1 hour before");
    }

    #[test]
    fn due_reminders() {
        let start = dt(1, 10, 0);
        let mut reminder = reminders_for(start, &[30]).remove(0);
        assert!(!reminder.is_due(&dt(1, 9, 29)));
        assert!(reminder.is_due(&dt(1, 9, 30)));
        reminder.sent = true;
        assert!(!reminder.is_due(&dt(1, 9, 31)));
    }
}
