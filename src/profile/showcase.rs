//! Profile showcase
//!
//! Fixed display collections rendered beside the profile. They are never
//! persisted or mutated; ids are unique within each collection.

use chrono::{DateTime, Duration, Utc};

/// Placeholder image used when a friend has no avatar
pub const FRIEND_AVATAR_PLACEHOLDER: &str = "https://via.placeholder.com/50";

/// A linked website
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: u32,
    pub name: &'static str,
    pub url: &'static str,
    pub icon: Option<&'static str>,
}

/// A notification entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub text: &'static str,
    pub received_at: DateTime<Utc>,
}

impl Notification {
    /// Relative age such as "5 min ago" or "2 hours ago"
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(self.received_at);
        let minutes = age.num_minutes();

        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{} min ago", minutes)
        } else if age.num_hours() < 24 {
            let hours = age.num_hours();
            if hours == 1 {
                "1 hour ago".to_string()
            } else {
                format!("{} hours ago", hours)
            }
        } else {
            let days = age.num_days();
            if days == 1 {
                "1 day ago".to_string()
            } else {
                format!("{} days ago", days)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendStatus {
    Online,
    Offline,
}

impl FriendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FriendStatus::Online => "Online",
            FriendStatus::Offline => "Offline",
        }
    }
}

/// A friend entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub id: u32,
    pub name: &'static str,
    pub status: FriendStatus,
    pub avatar: Option<&'static str>,
}

impl Friend {
    pub fn avatar_or_placeholder(&self) -> &'static str {
        self.avatar.unwrap_or(FRIEND_AVATAR_PLACEHOLDER)
    }
}

pub fn sites() -> Vec<Site> {
    vec![
        Site { id: 1, name: "Мой блог", url: "https://blog.com", icon: Some("📝") },
        Site { id: 2, name: "Портфолио", url: "https://portfolio.com", icon: Some("💼") },
        Site { id: 3, name: "GitHub", url: "https://github.com", icon: Some("💻") },
        Site { id: 4, name: "YouTube", url: "https://youtube.com", icon: Some("📺") },
        Site { id: 5, name: "LinkedIn", url: "https://linkedin.com", icon: Some("👔") },
        Site { id: 6, name: "Twitter", url: "https://twitter.com", icon: Some("🐦") },
    ]
}

/// Notifications, timestamped relative to `now`
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            text: "Новое уведомление от системы",
            received_at: now - Duration::minutes(5),
        },
        Notification {
            id: 2,
            text: "Важное обновление",
            received_at: now - Duration::minutes(10),
        },
        Notification {
            id: 3,
            text: "Ваш проект одобрен",
            received_at: now - Duration::hours(1),
        },
        Notification {
            id: 4,
            text: "Новое сообщение от друга",
            received_at: now - Duration::hours(2),
        },
    ]
}

pub fn friends() -> Vec<Friend> {
    vec![
        Friend { id: 1, name: "Анна", status: FriendStatus::Online, avatar: Some(FRIEND_AVATAR_PLACEHOLDER) },
        Friend { id: 2, name: "Дмитрий", status: FriendStatus::Offline, avatar: Some(FRIEND_AVATAR_PLACEHOLDER) },
        Friend { id: 3, name: "Елена", status: FriendStatus::Online, avatar: Some(FRIEND_AVATAR_PLACEHOLDER) },
        Friend { id: 4, name: "Алексей", status: FriendStatus::Offline, avatar: Some(FRIEND_AVATAR_PLACEHOLDER) },
        Friend { id: 5, name: "Мария", status: FriendStatus::Online, avatar: Some(FRIEND_AVATAR_PLACEHOLDER) },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let site_ids: HashSet<_> = sites().iter().map(|s| s.id).collect();
        assert_eq!(site_ids.len(), sites().len());

        let now = Utc::now();
        let note_ids: HashSet<_> = notifications(now).iter().map(|n| n.id).collect();
        assert_eq!(note_ids.len(), notifications(now).len());

        let friend_ids: HashSet<_> = friends().iter().map(|f| f.id).collect();
        assert_eq!(friend_ids.len(), friends().len());
    }

    #[test]
    fn test_notification_age_labels() {
        let now = Utc::now();
        let labels: Vec<String> = notifications(now).iter().map(|n| n.age_label(now)).collect();
        assert_eq!(labels, vec!["5 min ago", "10 min ago", "1 hour ago", "2 hours ago"]);

        let fresh = Notification { id: 9, text: "x", received_at: now };
        assert_eq!(fresh.age_label(now), "just now");

        let old = Notification { id: 10, text: "x", received_at: now - Duration::days(3) };
        assert_eq!(old.age_label(now), "3 days ago");
    }

    #[test]
    fn test_friend_avatar_placeholder() {
        let friend = Friend { id: 1, name: "x", status: FriendStatus::Offline, avatar: None };
        assert_eq!(friend.avatar_or_placeholder(), FRIEND_AVATAR_PLACEHOLDER);
        assert_eq!(friend.status.label(), "Offline");
    }
}
