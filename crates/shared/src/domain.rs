use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

index_newtype!(NavItemId);
index_newtype!(TabGroupId);
index_newtype!(AccordionId);
index_newtype!(CardId);
index_newtype!(ImageId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Admissions,
    Contact,
}

impl FormKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Admissions => "admissions",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

/// Card categories that take part in scroll reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardCategory {
    ProgramCard,
    ClubCard,
    NewsCard,
    StatCard,
    FacilityCard,
}

impl CardCategory {
    pub const ALL: [CardCategory; 5] = [
        Self::ProgramCard,
        Self::ClubCard,
        Self::NewsCard,
        Self::StatCard,
        Self::FacilityCard,
    ];

    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.class_name() == class)
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::ProgramCard => "program-card",
            Self::ClubCard => "club-card",
            Self::NewsCard => "news-card",
            Self::StatCard => "stat-card",
            Self::FacilityCard => "facility-card",
        }
    }
}

/// Axis-aligned box in document coordinates (pixels from the page origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            left: 0.0,
            width: 0.0,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}
