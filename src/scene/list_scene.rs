use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::fmt;

use super::dialog::{Dialog, DialogKind, InputError};
use crate::animation::{AnimationSequence, AnimationStep, Easing};
use crate::loader::{LoadError, parse_list, read_text};
use crate::structures::{CircularList, Handle};

/// Circular list scene tuning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Radius of the circle nodes are placed on
    pub radius: f32,
    pub node_radius: f32,
    /// Seconds for the shift animation when a node is linked in
    pub shift_duration: f32,
    /// Seconds a search or delete spends on each node
    pub scan_step: f32,
    /// Seconds a found / not found message stays up
    pub status_duration: f32,
    /// Values queued by the randomize command
    pub random_count: usize,
    /// Random values are drawn from `0..max_random_value`
    pub max_random_value: i32,
    pub easing: Easing,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            radius: 250.0,
            node_radius: 40.0,
            shift_duration: 1.0,
            scan_step: 0.5,
            status_duration: 1.0,
            random_count: 10,
            max_random_value: 100,
            easing: Easing::default(),
        }
    }
}

/// Position of node `index` out of `total` around `center`
///
/// One node sits on the center and two sit side by side; larger lists are
/// spread evenly on the circle starting at angle 0.
pub fn circular_position(total: usize, index: usize, center: Vec2, radius: f32) -> Vec2 {
    match total {
        0 | 1 => center,
        2 if index == 0 => center - Vec2::new(radius * 0.5, 0.0),
        2 => center + Vec2::new(radius * 0.5, 0.0),
        _ => center + Vec2::from_angle(TAU * index as f32 / total as f32) * radius,
    }
}

pub fn circular_positions(total: usize, center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..total)
        .map(|index| circular_position(total, index, center, radius))
        .collect()
}

/// A queued list operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    /// Link a value right after the head
    Insert(i32),
    AddAfter { dest: i32, value: i32 },
    Update { dest: i32, value: i32 },
    Search(i32),
    Delete(i32),
}

/// Interpolated state written by the shift animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFrame {
    pub positions: Vec<Vec2>,
    pub values: Vec<i32>,
    pub highlight: Option<usize>,
}

/// Message shown while the scene is busy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Shifting,
    Searching(i32),
    Deleting(i32),
    Found,
    Deleted,
    NotFound,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Found | Status::Deleted)
    }

    pub fn is_failure(self) -> bool {
        self == Status::NotFound
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Shifting => write!(f, "Traversing List..."),
            Status::Searching(value) => write!(f, "Searching for {}...", value),
            Status::Deleting(value) => write!(f, "Deleting {}...", value),
            Status::Found => write!(f, "Node Found!"),
            Status::Deleted => write!(f, "Node Deleted!"),
            Status::NotFound => write!(f, "Node Not Found!"),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub positions: Vec<Vec2>,
    pub values: Vec<i32>,
    pub highlight: Option<usize>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanKind {
    Search,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanOutcome {
    Walking,
    Found,
    NotFound,
}

/// Node-by-node walk for search and delete
#[derive(Debug, Clone)]
struct Scan {
    kind: ScanKind,
    value: i32,
    index: usize,
    timer: f32,
    outcome: ScanOutcome,
    status_timer: f32,
}

/// Link to perform once the shift animation ends
#[derive(Debug, Clone, Copy)]
enum PendingLink {
    AfterHead(i32),
    After(Handle, i32),
}

/// Circular linked-list visualizer state
#[derive(Resource, Debug)]
pub struct ListScene {
    config: ListConfig,
    list: CircularList<i32>,
    animation: AnimationSequence<ListFrame>,
    frame: ListFrame,
    queue: VecDeque<ListOp>,
    pending: Option<PendingLink>,
    scan: Option<Scan>,
    dialog: Option<Dialog>,
    center: Vec2,
    rng: StdRng,
}

impl Default for ListScene {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl ListScene {
    pub fn new(config: ListConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: ListConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ListConfig, rng: StdRng) -> Self {
        ListScene {
            config,
            list: CircularList::new(),
            animation: AnimationSequence::new(),
            frame: ListFrame::default(),
            queue: VecDeque::new(),
            pending: None,
            scan: None,
            dialog: None,
            center: Vec2::ZERO,
            rng,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Values from the head, once around
    pub fn values(&self) -> Vec<i32> {
        self.list.iter().copied().collect()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// An animation, scan or pending link is in progress
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.scan.is_some() || self.animation.is_playing()
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    // === Operations ===

    fn enqueue(&mut self, op: ListOp) {
        self.queue.push_back(op);
    }

    pub fn insert(&mut self, value: i32) {
        self.enqueue(ListOp::Insert(value));
    }

    pub fn add_after(&mut self, dest: i32, value: i32) {
        self.enqueue(ListOp::AddAfter { dest, value });
    }

    pub fn update_value(&mut self, dest: i32, value: i32) {
        self.enqueue(ListOp::Update { dest, value });
    }

    pub fn search(&mut self, value: i32) {
        self.enqueue(ListOp::Search(value));
    }

    pub fn delete(&mut self, value: i32) {
        self.enqueue(ListOp::Delete(value));
    }

    /// Queue one insert per value of a list file text
    ///
    /// Nothing is queued when the text does not parse.
    pub fn load_from_str(&mut self, text: &str) -> Result<usize, LoadError> {
        let values = parse_list(text)?;
        let count = values.len();
        for value in values {
            self.insert(value);
        }
        Ok(count)
    }

    pub fn load_from_file(&mut self, path: &str) -> Result<usize, LoadError> {
        let count = self.load_from_str(&read_text(path)?)?;
        log::info!("Queued {} values from {}", count, path);
        Ok(count)
    }

    /// Queue `count` inserts of random values
    pub fn randomize(&mut self, count: usize) {
        let upper = self.config.max_random_value.max(1);
        for _ in 0..count {
            let value = self.rng.random_range(0..upper);
            self.insert(value);
        }
    }

    /// Drop the list and everything in flight
    pub fn clear(&mut self) {
        self.list.clear();
        self.queue.clear();
        self.animation.clear();
        self.frame = ListFrame::default();
        self.pending = None;
        self.scan = None;
        log::info!("List cleared");
    }

    // === Playback ===

    pub fn speed(&self) -> f32 {
        self.animation.speed()
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.animation.set_speed(speed);
    }

    pub fn is_paused(&self) -> bool {
        self.pending.is_some() && !self.animation.is_playing()
    }

    pub fn toggle_pause(&mut self) {
        if self.animation.is_playing() {
            self.animation.pause();
        } else if self.pending.is_some() && !self.animation.is_finished() {
            self.animation.play();
        }
    }

    /// Restart the running shift from its first frame
    pub fn replay(&mut self) {
        if self.pending.is_some() {
            self.animation.play_previous();
        }
    }

    /// Finish the running shift on the next update
    pub fn skip(&mut self) {
        if self.pending.is_some() {
            self.animation.play_next();
        }
    }

    // === Dialogs ===

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Open a dialog, or close it if the same kind is already open
    pub fn toggle_dialog(&mut self, kind: DialogKind) {
        match &self.dialog {
            Some(dialog) if dialog.kind() == kind => self.dialog = None,
            _ => self.dialog = Some(Dialog::new(kind)),
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.input_mut().push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.input_mut().backspace();
        }
    }

    /// Submit the open dialog; a complete dialog queues its op and closes
    pub fn submit_dialog(&mut self) -> Result<(), InputError> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Ok(());
        };

        if let Some(op) = dialog.submit()? {
            self.dialog = None;
            self.enqueue(op);
        }
        Ok(())
    }

    // === Frame update ===

    /// Advance animations and scans, then start the next queued op when idle
    pub fn update(&mut self, dt: f32) {
        self.animation.update(dt, &mut self.frame);
        self.finish_shift();
        self.update_scan(dt);

        if !self.is_busy() {
            if let Some(op) = self.queue.pop_front() {
                self.start(op);
            }
        }
    }

    fn start(&mut self, op: ListOp) {
        match op {
            ListOp::Insert(value) => {
                let insert_at = usize::from(!self.list.is_empty());
                self.start_shift(insert_at, None, value, PendingLink::AfterHead(value));
            }
            ListOp::AddAfter { dest, value } => match self.list.find(&dest) {
                Some((index, handle)) => {
                    self.start_shift(index + 1, Some(index), value, PendingLink::After(handle, value))
                }
                None => log::info!("Add after {}: value not in list", dest),
            },
            ListOp::Update { dest, value } => match self.list.find(&dest) {
                Some((_, handle)) => {
                    self.list.set(handle, value);
                }
                None => log::info!("Update {}: value not in list", dest),
            },
            ListOp::Search(value) => self.start_scan(ScanKind::Search, value),
            ListOp::Delete(value) => self.start_scan(ScanKind::Delete, value),
        }
    }

    /// Animate every node to its place in the list grown by one
    ///
    /// The new node appears at `insert_at`, growing out of the node at
    /// `origin` (or the center).
    fn start_shift(&mut self, insert_at: usize, origin: Option<usize>, value: i32, link: PendingLink) {
        let count = self.list.len();
        let radius = self.config.radius;
        let old = circular_positions(count, self.center, radius);
        let to = circular_positions(count + 1, self.center, radius);
        let grow_from = origin.and_then(|i| old.get(i).copied()).unwrap_or(self.center);

        let mut from = Vec::with_capacity(count + 1);
        let mut values = Vec::with_capacity(count + 1);
        for (i, (&pos, &v)) in old.iter().zip(self.list.iter()).enumerate() {
            if i == insert_at {
                from.push(grow_from);
                values.push(value);
            }
            from.push(pos);
            values.push(v);
        }
        if from.len() == count {
            from.push(grow_from);
            values.push(value);
        }

        self.frame = ListFrame {
            positions: from.clone(),
            values,
            highlight: Some(insert_at),
        };

        let easing = self.config.easing;
        self.animation.clear();
        self.animation.push(AnimationStep::new(
            move |frame: &mut ListFrame, t: f32| {
                frame.positions = from
                    .iter()
                    .zip(&to)
                    .map(|(&a, &b)| easing.lerp(a, b, t))
                    .collect();
            },
            self.config.shift_duration,
        ));
        self.animation.play();
        self.pending = Some(link);
    }

    fn finish_shift(&mut self) {
        if !self.animation.is_finished() {
            return;
        }
        let Some(link) = self.pending.take() else {
            return;
        };

        match link {
            PendingLink::AfterHead(value) => {
                self.list.push_after_head(value);
            }
            PendingLink::After(handle, value) => {
                if self.list.insert_after(handle, value).is_none() {
                    log::warn!("Node for {} vanished before it could be linked", value);
                }
            }
        }

        self.animation.clear();
        self.frame = ListFrame::default();
    }

    fn start_scan(&mut self, kind: ScanKind, value: i32) {
        if self.list.is_empty() {
            log::debug!("Ignoring {:?} on an empty list", kind);
            return;
        }

        self.scan = Some(Scan {
            kind,
            value,
            index: 0,
            timer: 0.0,
            outcome: ScanOutcome::Walking,
            status_timer: 0.0,
        });
    }

    fn update_scan(&mut self, dt: f32) {
        let Some(scan) = self.scan.as_mut() else {
            return;
        };

        if scan.outcome != ScanOutcome::Walking {
            scan.status_timer += dt;
            if scan.status_timer >= self.config.status_duration {
                self.scan = None;
            }
            return;
        }

        if scan.index >= self.list.len() {
            scan.outcome = ScanOutcome::NotFound;
            log::info!("{} not found", scan.value);
            return;
        }

        scan.timer += dt;
        if scan.timer < self.config.scan_step {
            return;
        }

        let handle = self.list.nth(scan.index);
        let hit = handle
            .and_then(|h| self.list.get(h))
            .is_some_and(|&v| v == scan.value);

        if !hit {
            scan.index += 1;
            scan.timer = 0.0;
            return;
        }

        scan.outcome = ScanOutcome::Found;
        if scan.kind == ScanKind::Delete {
            if let Some(h) = handle {
                self.list.remove(h);
            }
            log::info!("Deleted {} at position {}", scan.value, scan.index);
        }
    }

    // === View ===

    pub fn status(&self) -> Option<Status> {
        if let Some(scan) = &self.scan {
            return Some(match (scan.kind, scan.outcome) {
                (ScanKind::Search, ScanOutcome::Walking) => Status::Searching(scan.value),
                (ScanKind::Delete, ScanOutcome::Walking) => Status::Deleting(scan.value),
                (ScanKind::Search, ScanOutcome::Found) => Status::Found,
                (ScanKind::Delete, ScanOutcome::Found) => Status::Deleted,
                (_, ScanOutcome::NotFound) => Status::NotFound,
            });
        }

        self.pending.map(|_| Status::Shifting)
    }

    pub fn view(&self) -> ListView {
        let status = self.status();

        if self.pending.is_some() && !self.frame.positions.is_empty() {
            return ListView {
                positions: self.frame.positions.clone(),
                values: self.frame.values.clone(),
                highlight: self.frame.highlight,
                status,
            };
        }

        let highlight = self.scan.as_ref().and_then(|scan| match (scan.kind, scan.outcome) {
            (_, ScanOutcome::Walking) | (ScanKind::Search, ScanOutcome::Found) => Some(scan.index),
            _ => None,
        });

        ListView {
            positions: circular_positions(self.list.len(), self.center, self.config.radius),
            values: self.values(),
            highlight,
            status,
        }
    }
}
