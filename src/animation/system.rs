use crate::scene::Scene;

/// Animation system.
///
/// Drives the scene's `AnimationMixer`.
/// Uses the `std::mem::take` technique to avoid borrow conflicts.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Evaluates all animation at an absolute scene frame.
    #[inline]
    pub fn evaluate(scene: &mut Scene, frame: f32) {
        // Temporarily take the mixer out to avoid borrow conflicts
        let mut mixer = std::mem::take(&mut scene.animation_mixer);

        mixer.evaluate(frame, scene);

        // Return mixer after update
        scene.animation_mixer = mixer;
    }
}
