//! Shared test infrastructure for life-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use chrono::NaiveDate;
use life_clock::{ClockDisplay, ClockFace, TimeSource, Timestamp};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<Timestamp>,
}

impl MockTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current_time: core::cell::Cell::new(start),
        }
    }

    /// Starts at midnight UTC of the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(Timestamp::from_date(date))
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: i64) {
        let current = self.current_time.get();
        self.current_time
            .set(Timestamp::from_millis(current.as_millis() + millis));
    }

    pub fn set_time(&self, time: Timestamp) {
        self.current_time.set(time);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records every rendered face
pub struct MockDisplay {
    faces: Vec<ClockFace>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    pub fn last_line(&self) -> Option<String> {
        self.faces.last().map(|face| face.to_string())
    }

    pub fn lines(&self) -> Vec<String> {
        self.faces.iter().map(|face| face.to_string()).collect()
    }

    pub fn render_count(&self) -> usize {
        self.faces.len()
    }
}

impl ClockDisplay for MockDisplay {
    fn render(&mut self, face: &ClockFace) {
        self.faces.push(face.clone());
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Compare two percentages with floating-point tolerance
pub fn approx_eq(a: f64, b: f64) -> bool {
    const EPSILON: f64 = 1e-9;
    (a - b).abs() < EPSILON
}
