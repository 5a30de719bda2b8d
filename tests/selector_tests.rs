//! Clip Selection Tests
//!
//! Tests for:
//! - ClipSelector policy over embedded clip lists
//! - Locomotion keyword matching
//! - Session-level override of procedural profiles by embedded clips

mod common;

use std::sync::Arc;

use glb_animator::motion::selector::is_locomotion_clip;
use glb_animator::motion::{ClipPolicy, ClipSelector, DriverState, ProfileId};
use glb_animator::{AnimationClip, AnimatorSettings};

use common::{DT, block_on, clip_model, glb_file, node_transform, root_transform, session, session_with, static_model};

fn clips(names: &[&str]) -> Vec<Arc<AnimationClip>> {
    names.iter().map(|n| Arc::new(AnimationClip::empty(*n))).collect()
}

fn selected(selector: ClipSelector, names: &[&str], profile: ProfileId) -> Option<String> {
    let clips = clips(names);
    selector.select(&clips, profile).map(|c| c.name.clone())
}

// ============================================================================
// ClipSelector::select
// ============================================================================

#[test]
fn no_clips_never_selects() {
    let selector = ClipSelector::default();
    for profile in ProfileId::ALL {
        assert_eq!(selected(selector, &[], profile), None);
    }
}

#[test]
fn non_walk_profile_gets_first_declared_clip() {
    let selector = ClipSelector::default();
    assert_eq!(
        selected(selector, &["idle_01", "attack"], ProfileId::Bounce).as_deref(),
        Some("idle_01")
    );
    assert_eq!(
        selected(selector, &["attack", "Walk_Cycle"], ProfileId::Rotate).as_deref(),
        Some("attack")
    );
    assert_eq!(
        selected(selector, &["attack", "Walk_Cycle"], ProfileId::Scale).as_deref(),
        Some("attack")
    );
}

#[test]
fn walk_prefers_first_locomotion_clip() {
    let selector = ClipSelector::default();
    assert_eq!(
        selected(selector, &["attack", "RUN_fast", "walk"], ProfileId::Walk).as_deref(),
        Some("RUN_fast")
    );
    assert_eq!(
        selected(selector, &["attack", "jump"], ProfileId::Walk).as_deref(),
        Some("attack")
    );
}

#[test]
fn custom_is_never_overridden() {
    let selector = ClipSelector::default();
    assert_eq!(selected(selector, &["walk", "idle"], ProfileId::Custom), None);
    let selector = ClipSelector::new(ClipPolicy::WalkOnly);
    assert_eq!(selected(selector, &["walk", "idle"], ProfileId::Custom), None);
}

#[test]
fn walk_only_policy_keeps_other_profiles_procedural() {
    let selector = ClipSelector::new(ClipPolicy::WalkOnly);
    assert_eq!(selected(selector, &["idle_01", "attack"], ProfileId::Bounce), None);
    assert_eq!(selected(selector, &["idle_01", "attack"], ProfileId::Rotate), None);
    assert_eq!(
        selected(selector, &["attack", "idle_01"], ProfileId::Walk).as_deref(),
        Some("idle_01")
    );
}

#[test]
fn locomotion_keywords_match_case_insensitive_substrings() {
    assert!(is_locomotion_clip("Walk"));
    assert!(is_locomotion_clip("character|Running"));
    assert!(is_locomotion_clip("IDLE_02"));
    assert!(!is_locomotion_clip("attack"));
    assert!(!is_locomotion_clip(""));
}

// ============================================================================
// Session Integration
// ============================================================================

#[test]
fn embedded_clip_overrides_requested_profile() {
    let mut session = session();
    block_on(session.on_file_accepted(glb_file("robot.glb", clip_model(&["idle_01", "attack"])))).unwrap();

    assert_eq!(session.active_profile(), ProfileId::Rotate);
    assert_eq!(session.active_clip_name(), Some("idle_01"));
    assert_eq!(session.driver_state(), DriverState::Running);

    for _ in 0..30 {
        session.frame(DT);
    }
    // the clip drives the child node; the root is left alone
    assert_eq!(root_transform(&session).rotation.y, 0.0);
    let body = node_transform(&session, "Body");
    assert!((body.position.y - 1.0).abs() < 1e-3, "got {}", body.position.y);
}

#[test]
fn switching_to_custom_drops_the_clip() {
    let mut session = session();
    block_on(session.on_file_accepted(glb_file("robot.glb", clip_model(&["attack"])))).unwrap();
    assert_eq!(session.active_clip_name(), Some("attack"));

    session.select_profile(ProfileId::Custom);
    assert_eq!(session.active_clip_name(), None);
    assert_eq!(session.frame(DT), 1);
    assert_eq!(session.frames().live_registrations(), 1);
}

#[test]
fn walk_picks_locomotion_clip_from_asset() {
    let mut session = session();
    block_on(session.on_file_accepted(glb_file("robot.glb", clip_model(&["attack", "Walk"])))).unwrap();
    assert_eq!(session.active_clip_name(), Some("attack"));

    session.select_profile(ProfileId::Walk);
    assert_eq!(session.active_clip_name(), Some("Walk"));
}

#[test]
fn walk_only_policy_runs_procedural_bounce() {
    let mut session = session_with(AnimatorSettings {
        initial_model_uri: None,
        initial_profile: ProfileId::Bounce,
        clip_policy: ClipPolicy::WalkOnly,
        ..AnimatorSettings::default()
    });
    block_on(session.on_file_accepted(glb_file("robot.glb", clip_model(&["idle_01"])))).unwrap();

    assert_eq!(session.active_clip_name(), None);
    session.frame(DT);
    assert_eq!(root_transform(&session).position.y, 0.01);
}

#[test]
fn asset_without_clips_runs_the_procedural_profile() {
    let mut session = session();
    block_on(session.on_file_accepted(glb_file("static.glb", static_model()))).unwrap();
    assert_eq!(session.active_clip_name(), None);
    session.frame(DT);
    assert_eq!(root_transform(&session).rotation.y, 0.01);
}
