//! Normalized timetable input: lessons and the modules that group them.
//!
//! These mirror what a timetable feed returns for one student's selected
//! classes, after the caller has already picked the class number per lesson
//! type. Field names follow the feed (`classNo`, `lessonType`, `startTime`,
//! ...), so feed JSON deserializes directly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::day::DayOccupancy;
use crate::error::{OccupancyError, Result};
use crate::events::{end_hhmm, hhmm, BusyRange};

/// Kind of class a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LessonType {
    DesignLecture,
    Laboratory,
    Lecture,
    PackagedLecture,
    PackagedTutorial,
    Recitation,
    SectionalTeaching,
    Seminar,
    Tutorial,
    Tutorial2,
    Tutorial3,
    Workshop,
}

impl LessonType {
    pub const ALL: [LessonType; 12] = [
        LessonType::DesignLecture,
        LessonType::Laboratory,
        LessonType::Lecture,
        LessonType::PackagedLecture,
        LessonType::PackagedTutorial,
        LessonType::Recitation,
        LessonType::SectionalTeaching,
        LessonType::Seminar,
        LessonType::Tutorial,
        LessonType::Tutorial2,
        LessonType::Tutorial3,
        LessonType::Workshop,
    ];

    /// The full name used by timetable feeds.
    pub fn name(self) -> &'static str {
        match self {
            LessonType::DesignLecture => "Design Lecture",
            LessonType::Laboratory => "Laboratory",
            LessonType::Lecture => "Lecture",
            LessonType::PackagedLecture => "Packaged Lecture",
            LessonType::PackagedTutorial => "Packaged Tutorial",
            LessonType::Recitation => "Recitation",
            LessonType::SectionalTeaching => "Sectional Teaching",
            LessonType::Seminar => "Seminar-Style Module Class",
            LessonType::Tutorial => "Tutorial",
            LessonType::Tutorial2 => "Tutorial Type 2",
            LessonType::Tutorial3 => "Tutorial Type 3",
            LessonType::Workshop => "Workshop",
        }
    }

    /// The short code used in share links.
    pub fn abbreviation(self) -> &'static str {
        match self {
            LessonType::DesignLecture => "DLEC",
            LessonType::Laboratory => "LAB",
            LessonType::Lecture => "LEC",
            LessonType::PackagedLecture => "PLEC",
            LessonType::PackagedTutorial => "PTUT",
            LessonType::Recitation => "REC",
            LessonType::SectionalTeaching => "SEC",
            LessonType::Seminar => "SEM",
            LessonType::Tutorial => "TUT",
            LessonType::Tutorial2 => "TUT2",
            LessonType::Tutorial3 => "TUT3",
            LessonType::Workshop => "WS",
        }
    }
}

impl FromStr for LessonType {
    type Err = OccupancyError;

    /// Accepts either the full name or the abbreviation.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        LessonType::ALL
            .into_iter()
            .find(|t| t.name() == s || t.abbreviation() == s)
            .ok_or_else(|| OccupancyError::UnknownLessonType(s.to_string()))
    }
}

impl TryFrom<String> for LessonType {
    type Error = OccupancyError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LessonType> for String {
    fn from(t: LessonType) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One weekly class slot of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub class_no: String,
    pub lesson_type: LessonType,
    pub day: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// `00:00` means the lesson runs until midnight; the feed writes it as `2400`.
    #[serde(with = "end_hhmm")]
    pub end_time: NaiveTime,
    /// Teaching weeks in which the lesson takes place.
    pub weeks: BTreeSet<u32>,
    #[serde(default)]
    pub venue: String,
}

impl Lesson {
    pub fn runs_on(&self, weekday: Weekday, week: u32) -> bool {
        self.day == weekday && self.weeks.contains(&week)
    }

    pub fn busy_range(&self) -> Result<BusyRange> {
        BusyRange::new(self.start_time, self.end_time)
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weeks: Vec<String> = self.weeks.iter().map(|w| w.to_string()).collect();
        write!(
            f,
            "{} {} on {} on weeks {} from {} to {}",
            self.lesson_type,
            self.class_no,
            self.day,
            weeks.join(", "),
            self.start_time.format("%H:%M"),
            end_of_lesson(self.end_time),
        )?;
        if !self.venue.is_empty() {
            write!(f, " at {}", self.venue)?;
        }
        Ok(())
    }
}

fn end_of_lesson(t: NaiveTime) -> String {
    if t == NaiveTime::MIN {
        "24:00".to_string()
    } else {
        t.format("%H:%M").to_string()
    }
}

/// A module taken in one semester, with the lessons the student attends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub semester: u8,
    pub lessons: Vec<Lesson>,
}

impl Module {
    pub fn lessons_on(&self, weekday: Weekday, week: u32) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter().filter(move |l| l.runs_on(weekday, week))
    }

    /// Occupancy of `date` (in teaching week `week`) caused by this module alone.
    pub fn occupancy_on(&self, date: NaiveDate, week: u32) -> Result<DayOccupancy> {
        let mut day = DayOccupancy::empty(date);
        day.insert_lessons(&self.lessons, week)?;
        Ok(day)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:", self.code, self.title)?;
        for lesson in &self.lessons {
            write!(f, "\n{}", lesson)?;
        }
        Ok(())
    }
}
