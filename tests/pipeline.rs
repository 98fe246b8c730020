//! End-to-end tests: image files on disk through discovery, checking,
//! parallel loading and upload into sprites.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use spriteset::{discover, Catalog, Sprite, SpriteTarget, Tier};

/// Write a `size` x `size` frame with an opaque block in its middle half.
fn write_frame(root: &Path, relative: &str, size: u32) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut img = RgbaImage::new(size, size);
    for y in size / 4..size * 3 / 4 {
        for x in size / 4..size * 3 / 4 {
            img.put_pixel(x, y, Rgba([90, 160, 220, 255]));
        }
    }
    img.save(path).unwrap();
}

fn upload_all(catalog: &Catalog, include_deferred: bool) -> Vec<Sprite> {
    let mut sprites = Vec::new();
    catalog.load_each(include_deferred, |loaded| {
        let mut sprite = Sprite::new(loaded.name());
        loaded.upload(&mut sprite);
        sprites.push(sprite);
    });
    sprites.sort_by(|a, b| a.name().cmp(b.name()));
    sprites
}

#[test]
fn fighter_with_partial_high_dpi_tier() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    write_frame(&images, "ship/fighter.png", 16);
    write_frame(&images, "ship/fighter@2x.png", 32);
    write_frame(&images, "ship/fighter-1.png", 16);
    write_frame(&images, "ship/fighter-2.png", 16);

    let catalog = discover(dir.path()).unwrap().into_catalog();
    let set = catalog.get("ship/fighter").unwrap();
    assert_eq!(set.name(), "ship/fighter");
    assert_eq!(set.frame_count(), 3);
    assert_eq!(set.high_dpi_count(), 1);
    assert!(set.is_masked());

    let report = catalog.check_all();
    let messages: Vec<&str> = report.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Sprite \"ship/fighter\": missing @2x frame 1.",
            "Sprite \"ship/fighter\": missing @2x frame 2.",
        ]
    );
    assert!(!report.has_errors());

    let sprites = upload_all(&catalog, false);
    assert_eq!(sprites.len(), 1);
    let fighter = &sprites[0];
    assert_eq!((fighter.width(), fighter.height(), fighter.frames()), (16, 16, 3));
    assert!(fighter.has_high_dpi());
    assert_eq!(fighter.frames_for(true).unwrap().width(), 32);
    assert!(fighter.frames_for(true).unwrap().is_loaded(0));
    assert!(!fighter.frames_for(true).unwrap().is_loaded(1));

    assert_eq!(fighter.masks().len(), 3);
    assert!(fighter.masks().iter().all(|m| !m.is_empty()));

    let field = fighter.distance_field();
    assert_eq!((field.width(), field.height(), field.frames()), (8, 8, 3));
    for frame in 0..3 {
        assert!(field.value(frame, 4, 4).unwrap() < 0.0);
        assert!(field.value(frame, 0, 0).unwrap() > 0.0);
    }
}

#[test]
fn descriptor_survives_reload() {
    let dir = tempdir().unwrap();
    write_frame(dir.path(), "images/asteroid/rock.png", 16);

    let catalog = discover(dir.path()).unwrap().into_catalog();
    let set = catalog.get("asteroid/rock").unwrap();

    let mut first = Sprite::new(set.name());
    set.load().upload(&mut first);
    first.unload();
    assert_eq!(first.frames(), 0);
    assert_eq!(first.masks().len(), 1);

    let mut second = Sprite::new(set.name());
    set.load().upload(&mut second);
    assert_eq!(second.frames(), 1);
    assert_eq!(second.masks(), first.masks());
}

#[test]
fn gaps_and_decode_failures_degrade_gracefully() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    write_frame(&images, "ship/scout.png", 16);
    write_frame(&images, "ship/scout-2.png", 16);
    fs::write(images.join("ship/scout-3.png"), b"not a png").unwrap();

    let catalog = discover(dir.path()).unwrap().into_catalog();
    let report = catalog.check_all();
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.iter().next().unwrap().message,
        "Sprite \"ship/scout\": missing frame 1."
    );

    let set = catalog.get("ship/scout").unwrap();
    let loaded = set.load();
    assert_eq!(loaded.report().warning_count(), 1);
    assert_eq!(loaded.buffer(Tier::Standard).loaded_count(), 2);
    assert!(loaded.masks()[1].is_empty());
    assert!(loaded.masks()[3].is_empty());

    let field = loaded.distances();
    assert_eq!(field.frames(), 4);
    assert!(field.frame(1).unwrap().iter().all(|v| v.is_infinite()));
    assert!(field.frame(2).unwrap().iter().any(|v| *v < 0.0));

    let mut sprite = Sprite::new(loaded.name());
    loaded.upload(&mut sprite);
    assert_eq!(sprite.frames(), 4);
}

/// A target that only counts what it receives.
#[derive(Default)]
struct Counter {
    tiers: usize,
    masks: usize,
    distance_frames: usize,
}

impl SpriteTarget for Counter {
    fn add_frames(&mut self, buffer: spriteset::ImageBuffer, _high_dpi: bool) {
        if !buffer.is_empty() {
            self.tiers += 1;
        }
    }

    fn add_masks(&mut self, masks: Vec<spriteset::Mask>) {
        self.masks += masks.len();
    }

    fn add_mask_distances(&mut self, distances: spriteset::DistanceField) {
        self.distance_frames += distances.frames();
    }
}

#[test]
fn unmasked_sprites_carry_no_collision_data() {
    let dir = tempdir().unwrap();
    write_frame(dir.path(), "images/effect/spark.png", 8);
    write_frame(dir.path(), "images/effect/spark-1.png", 8);
    write_frame(dir.path(), "images/land/beach.png", 8);

    let catalog = discover(dir.path()).unwrap().into_catalog();
    assert_eq!(catalog.len(), 2);

    let loaded = catalog.load_all(false);
    assert_eq!(loaded.len(), 1);

    let mut counter = Counter::default();
    for set in loaded {
        set.upload(&mut counter);
    }
    assert_eq!(counter.tiers, 1);
    assert_eq!(counter.masks, 0);
    assert_eq!(counter.distance_frames, 0);

    assert_eq!(catalog.load_all(true).len(), 2);
}
