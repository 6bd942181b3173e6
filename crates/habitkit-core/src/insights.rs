//! Cross-habit summary statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{self, parse_date_key, to_date_key, weekday_index, weekday_name};
use crate::habit::Habit;

/// Summary figures across the whole habit collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Number of habits.
    pub total: u32,
    /// Habits completed today.
    pub done_today: u32,
    /// Category with the most habits; `None` for an empty collection.
    /// Ties go to the category encountered first.
    pub top_category: Option<String>,
    /// Weekday name ("Sun".."Sat") with the most completions across every
    /// habit's entire history; `None` when no completions exist anywhere.
    pub busiest_day: Option<String>,
}

/// Compute [`Insights`] for today.
pub fn generate_insights(habits: &[Habit]) -> Insights {
    insights_on(habits, dates::today())
}

/// Deterministic variant of [`generate_insights`] with an explicit "today".
pub fn insights_on(habits: &[Habit], today: NaiveDate) -> Insights {
    let today_key = to_date_key(today);

    let done_today = habits
        .iter()
        .filter(|h| h.is_completed_on(&today_key))
        .count() as u32;

    // Vec-based counters keep first-encountered order for tie-breaking.
    let mut categories: Vec<(&str, u32)> = Vec::new();
    for habit in habits {
        match categories.iter_mut().find(|(c, _)| *c == habit.category) {
            Some(entry) => entry.1 += 1,
            None => categories.push((habit.category.as_str(), 1)),
        }
    }
    // Strict > keeps the first-encountered winner on ties.
    let mut top_category: Option<(&str, u32)> = None;
    for &(category, count) in &categories {
        if top_category.map_or(true, |(_, best)| count > best) {
            top_category = Some((category, count));
        }
    }
    let top_category = top_category.map(|(c, _)| c.to_string());

    // Insertion-ordered like `categories`, so ties go to the weekday first
    // seen while walking completions, not to a fixed Sun..Sat order.
    let mut day_counts: Vec<(u8, u32)> = Vec::new();
    for habit in habits {
        for key in &habit.completed_dates {
            if let Some(date) = parse_date_key(key) {
                let day = weekday_index(date);
                match day_counts.iter_mut().find(|(d, _)| *d == day) {
                    Some(entry) => entry.1 += 1,
                    None => day_counts.push((day, 1)),
                }
            }
        }
    }
    let mut busiest_day: Option<(u8, u32)> = None;
    for &(day, count) in &day_counts {
        if busiest_day.map_or(true, |(_, best)| count > best) {
            busiest_day = Some((day, count));
        }
    }
    let busiest_day = busiest_day.map(|(day, _)| weekday_name(day).to_string());

    Insights {
        total: habits.len() as u32,
        done_today,
        top_category,
        busiest_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Frequency;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit_in(category: &str) -> Habit {
        Habit::new(category.to_string(), "", "", category, Frequency::Daily, vec![])
    }

    #[test]
    fn empty_collection_yields_empty_insights() {
        let insights = insights_on(&[], day(2026, 3, 10));
        assert_eq!(insights.total, 0);
        assert_eq!(insights.done_today, 0);
        assert_eq!(insights.top_category, None);
        assert_eq!(insights.busiest_day, None);
    }

    #[test]
    fn top_category_by_habit_count() {
        let habits = vec![habit_in("Health"), habit_in("Health"), habit_in("Fitness")];
        let insights = insights_on(&habits, day(2026, 3, 10));
        assert_eq!(insights.total, 3);
        assert_eq!(insights.top_category.as_deref(), Some("Health"));
    }

    #[test]
    fn category_ties_go_to_first_encountered() {
        let habits = vec![habit_in("Mind"), habit_in("Body"), habit_in("Body"), habit_in("Mind")];
        let insights = insights_on(&habits, day(2026, 3, 10));
        assert_eq!(insights.top_category.as_deref(), Some("Mind"));
    }

    #[test]
    fn done_today_counts_completions_for_today_only() {
        let today = day(2026, 3, 10);
        let mut done = habit_in("Health");
        done.completed_dates = vec![to_date_key(today)];
        let mut stale = habit_in("Health");
        stale.completed_dates = vec![to_date_key(day(2026, 3, 9))];

        let insights = insights_on(&[done, stale], today);
        assert_eq!(insights.done_today, 1);
    }

    #[test]
    fn busiest_day_sums_across_all_habits() {
        // Two Mondays and one Tuesday across two habits.
        let mut a = habit_in("Health");
        a.completed_dates = vec!["2026-03-02".to_string(), "2026-03-03".to_string()];
        let mut b = habit_in("Fitness");
        b.completed_dates = vec!["2026-03-09".to_string()]; // another Monday

        let insights = insights_on(&[a, b], day(2026, 3, 10));
        assert_eq!(insights.busiest_day.as_deref(), Some("Mon"));
    }

    #[test]
    fn weekday_ties_go_to_first_encountered() {
        // One Tuesday completion listed before one Monday completion: the
        // tie goes to Tuesday because it is seen first.
        let mut h = habit_in("Health");
        h.completed_dates = vec!["2026-03-03".to_string(), "2026-03-02".to_string()];
        let insights = insights_on(&[h], day(2026, 3, 10));
        assert_eq!(insights.busiest_day.as_deref(), Some("Tue"));
    }

    #[test]
    fn busiest_day_is_none_without_completions() {
        let habits = vec![habit_in("Health")];
        let insights = insights_on(&habits, day(2026, 3, 10));
        assert_eq!(insights.busiest_day, None);
    }
}
