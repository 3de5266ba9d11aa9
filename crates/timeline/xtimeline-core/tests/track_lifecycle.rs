use std::rc::Rc;

use approx::assert_relative_eq;
use nalgebra::Vector3;
use xtimeline_core::{
    euler_degrees_to_quat, parent_ref, BindTrack, ClipData, Config, LocalTransform, SceneTargets,
    Timeline, TimelineId, TimelineTrack, TrackDescriptor, TrackError, TrackFactory, TrackPool,
    TrackState, TransformTrack, TransformTrackData,
};

fn slide() -> TransformTrackData {
    let json = xtimeline_test_fixtures::transform_tracks::json("slide-x").expect("load slide-x");
    TransformTrackData::from_json(&json).expect("parse slide-x")
}

fn scene_with(name: &str) -> SceneTargets {
    let mut scene = SceneTargets::new();
    scene.insert(name, LocalTransform::default());
    scene
}

#[test]
fn full_state_machine_through_a_pool() {
    let parent = Rc::new(BindTrack::bound_to("anim", "cube"));
    let mut pool: TrackPool<TransformTrack> = TrackPool::new(&Config::default());

    let h = pool.acquire();
    assert_eq!(pool.get(h).unwrap().state(), TrackState::Unbuilt);

    pool.get_mut(h)
        .unwrap()
        .build(TrackDescriptor::new(slide(), TimelineId(1), Some(parent_ref(&parent))))
        .unwrap();
    assert_eq!(pool.get(h).unwrap().state(), TrackState::Built);

    assert!(pool.release(h));
    assert!(pool.get(h).is_none());
    assert_eq!(pool.free_len(), 1);

    // Reacquisition starts a distinct logical lifetime in the same slot.
    let again = pool.acquire();
    assert_eq!(again.index(), h.index());
    assert_ne!(again, h);
    let track = pool.get_mut(again).unwrap();
    assert_eq!(track.state(), TrackState::Unbuilt);
    assert!(track.data().is_none());
    assert!(track.target().is_none());
    assert_eq!(pool.free_len(), 0);
}

#[test]
fn many_destroy_recreate_cycles_do_not_grow_the_pool() {
    let parent = Rc::new(BindTrack::bound_to("anim", "cube"));
    let mut tl = Timeline::new(TimelineId(0), &Config::default());
    for _ in 0..3 {
        tl.add_track(slide(), Some(parent_ref(&parent))).unwrap();
    }
    for _ in 0..10 {
        tl.rebuild().unwrap();
    }
    assert_eq!(tl.active_len(), 3);
    assert_eq!(tl.pool().len(), 3);
    assert_eq!(tl.pool().free_len(), 0);
}

#[test]
fn timeline_process_applies_rotation_as_quaternion() {
    let parent = Rc::new(BindTrack::bound_to("anim", "cube"));
    let mut tl = Timeline::new(TimelineId(0), &Config::default());
    let h = tl.add_track(slide(), Some(parent_ref(&parent))).unwrap();
    tl.track_mut(h)
        .unwrap()
        .add_item(10.0, [10.0, 0.0, 0.0], [0.0, 0.0, 90.0]);

    let mut scene = scene_with("cube");
    tl.process(5.0, 0.0, &mut scene);

    let cube = scene.get("cube").unwrap();
    assert_relative_eq!(cube.position, Vector3::new(5.0, 0.0, 0.0));
    let expected = euler_degrees_to_quat([0.0, 0.0, 45.0]);
    assert!(cube.rotation.angle_to(&expected) < 1e-5);
}

#[test]
fn edits_between_frames_are_visible_on_the_next_process() {
    let parent = Rc::new(BindTrack::bound_to("anim", "cube"));
    let mut tl = Timeline::new(TimelineId(0), &Config::default());
    let h = tl.add_track(slide(), Some(parent_ref(&parent))).unwrap();
    let mut scene = scene_with("cube");

    tl.process(5.0, 0.0, &mut scene);
    assert_eq!(scene.get("cube").unwrap().position, Vector3::new(5.0, 0.0, 0.0));

    tl.track_mut(h)
        .unwrap()
        .add_item(5.0, [5.0, 5.0, 5.0], [0.0, 0.0, 0.0]);
    tl.process(5.0, 5.0, &mut scene);
    assert_eq!(scene.get("cube").unwrap().position, Vector3::new(5.0, 5.0, 5.0));

    assert!(tl.track_mut(h).unwrap().remove_item(5.0));
    assert!(!tl.track_mut(h).unwrap().remove_item(5.0));
    tl.process(5.0, 5.0, &mut scene);
    assert_eq!(scene.get("cube").unwrap().position, Vector3::new(5.0, 0.0, 0.0));
}

#[test]
fn clone_goes_through_the_supplied_factory() {
    struct CountingFactory {
        pool: TrackPool<TransformTrack>,
        calls: usize,
    }

    impl TrackFactory for CountingFactory {
        fn get_track(
            &mut self,
            desc: TrackDescriptor,
        ) -> Result<xtimeline_core::PoolHandle, TrackError> {
            self.calls += 1;
            self.pool.get_track(desc)
        }
    }

    let parent = Rc::new(BindTrack::bound_to("anim", "cube"));
    let mut tl = Timeline::new(TimelineId(4), &Config::default());
    let h = tl.add_track(slide(), Some(parent_ref(&parent))).unwrap();

    let mut factory = CountingFactory {
        pool: TrackPool::default(),
        calls: 0,
    };
    let copy = tl.track(h).unwrap().clone_with(&mut factory).unwrap();
    assert_eq!(factory.calls, 1);
    let cloned = factory.pool.get(copy).unwrap();
    assert_eq!(cloned.timeline(), TimelineId(4));
    assert_eq!(cloned.data(), tl.track(h).unwrap().data());
}

#[test]
fn clips_are_never_built_for_transform_tracks() {
    let mut tl = Timeline::new(TimelineId(0), &Config::default());
    let h = tl.add_track(slide(), None).unwrap();
    let err = tl
        .track_mut(h)
        .unwrap()
        .build_clip(&ClipData {
            start: 0.0,
            duration: 2.0,
        })
        .unwrap_err();
    assert_eq!(
        err,
        TrackError::UnsupportedOperation {
            track: "transform track",
            operation: "clips",
        }
    );
}

#[test]
fn stale_handles_fail_cloning() {
    let mut tl = Timeline::new(TimelineId(0), &Config::default());
    let h = tl.add_track(slide(), None).unwrap();
    assert!(tl.destroy_track(h));
    assert!(matches!(
        tl.clone_track(h),
        Err(TrackError::StaleHandle { .. })
    ));
}
