// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted event source: replays pointer events recorded in a JSON file.
//
// Script format:
//
//   { "events": [ {"press": {"x": 1, "y": 2}}, {"move": {"x": 5, "y": 6}},
//                 {"release": {"x": 5, "y": 6}}, "confirm" ] }

use std::collections::VecDeque;
use std::path::Path;

use quadscan_core::error::{Result, ScanError};
use quadscan_document::{EditorEvent, EventSource};
use serde::Deserialize;
use tracing::{debug, info, trace};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    events: Vec<EditorEvent>,
}

/// Delivers a fixed sequence of events, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSession {
    events: VecDeque<EditorEvent>,
    delivered: usize,
}

impl ScriptedSession {
    pub fn from_events(events: impl IntoIterator<Item = EditorEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            delivered: 0,
        }
    }

    /// A session that accepts the detected corners unchanged.
    pub fn confirm_only() -> Self {
        Self::from_events([EditorEvent::Confirm])
    }

    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(text)
            .map_err(|err| ScanError::Bridge(format!("invalid event script: {err}")))?;
        Ok(Self::from_events(script.events))
    }

    /// Read and parse a script file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            ScanError::Bridge(format!("cannot read event script {}: {err}", path.display()))
        })?;
        let session = Self::from_json(&text)?;
        info!(path = %path.display(), events = session.remaining(), "Event script loaded");
        Ok(session)
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Events handed out so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl EventSource for ScriptedSession {
    fn next_event(&mut self) -> Option<EditorEvent> {
        match self.events.pop_front() {
            Some(event) => {
                self.delivered += 1;
                trace!(?event, n = self.delivered, "Scripted event");
                Some(event)
            }
            None => {
                debug!(delivered = self.delivered, "Event script exhausted");
                None
            }
        }
    }
}
