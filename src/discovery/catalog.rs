//! Grouping discovered images into frame sets.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use rayon::prelude::*;

use crate::frames::{FrameSet, LoadedFrameSet};
use crate::grammar;
use crate::validation::ValidationResult;

use super::scanner::ScanResult;

/// Every sprite found in a set of image roots, keyed by sprite name.
#[derive(Debug, Default)]
pub struct Catalog {
    sets: BTreeMap<String, FrameSet>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from scanned images.
    pub fn from_scan(scan: &ScanResult) -> Self {
        let mut catalog = Self::new();
        for image in &scan.images {
            catalog.add(&image.relative, image.path.clone());
        }
        catalog
    }

    /// Add an image. `relative` is the path below the image root and decides
    /// which sprite the image belongs to; `path` is where to read it from.
    pub fn add(&mut self, relative: &str, path: impl Into<PathBuf>) {
        let name = grammar::name(relative);
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| FrameSet::new(name))
            .add(path);
    }

    pub fn get(&self, name: &str) -> Option<&FrameSet> {
        self.sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All frame sets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FrameSet> {
        self.sets.values()
    }

    /// Sets loaded up front.
    pub fn eager(&self) -> impl Iterator<Item = &FrameSet> {
        self.iter().filter(|set| !set.is_deferred())
    }

    /// Sets loaded only when first needed.
    pub fn deferred(&self) -> impl Iterator<Item = &FrameSet> {
        self.iter().filter(|set| set.is_deferred())
    }

    /// Run the completeness check on every set.
    pub fn check_all(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        for set in self.iter() {
            result.merge(set.check());
        }
        result
    }

    /// Load sets in parallel and collect the results in name order.
    pub fn load_all(&self, include_deferred: bool) -> Vec<LoadedFrameSet> {
        self.loadable(include_deferred)
            .collect::<Vec<_>>()
            .par_iter()
            .map(|set| set.load())
            .collect()
    }

    /// Load sets in parallel and pass each one to `consume` on the calling
    /// thread as soon as it is ready.
    ///
    /// Workers only produce; `consume` is the single place loaded data is
    /// taken over, so it may own resources that must stay on this thread.
    pub fn load_each<F>(&self, include_deferred: bool, mut consume: F)
    where
        F: FnMut(LoadedFrameSet),
    {
        let sets: Vec<&FrameSet> = self.loadable(include_deferred).collect();
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            scope.spawn(move || {
                sets.par_iter().for_each_with(tx, |tx, set| {
                    // The receiver only goes away once this scope ends.
                    let _ = tx.send(set.load());
                });
            });

            for loaded in rx {
                consume(loaded);
            }
        });
    }

    fn loadable(&self, include_deferred: bool) -> impl Iterator<Item = &FrameSet> {
        self.iter()
            .filter(move |set| include_deferred || !set.is_deferred())
    }
}
