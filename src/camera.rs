use glam::Vec2;

use crate::geometry::Rect;

/// 2D camera: follows a world-space point inside the world bounds, with smooth
/// zoom and screen-shake.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World-space point the view is centred on.
    pub position: Vec2,
    /// Current zoom level (1.0 = 1:1, >1 zooms in, <1 zooms out).
    pub zoom: f32,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    /// Smooth-zoom lerp target; `set_zoom` writes here.
    pub(crate) target_zoom: f32,
    /// Remaining shake time in seconds.
    pub(crate) shake_timer: f32,
    /// Peak shake displacement in pixels.
    pub(crate) shake_intensity: f32,
    /// Current shake displacement offset (recomputed every tick).
    pub(crate) shake_offset: Vec2,
    /// World size from the last `follow`; the view is kept inside it.
    pub(crate) world: Option<Vec2>,
}

impl Camera {
    pub fn new(viewport: Vec2, zoom: f32) -> Self {
        let zoom = zoom.max(0.01);
        Self {
            position: viewport * 0.5 / zoom,
            zoom,
            viewport,
            target_zoom: zoom,
            shake_timer: 0.0,
            shake_intensity: 0.0,
            shake_offset: Vec2::ZERO,
            world: None,
        }
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Ease toward `zoom` over the next few ticks.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.target_zoom = zoom.max(0.01);
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    /// World-space size of the visible region.
    pub fn view_size(&self) -> Vec2 {
        self.viewport / self.zoom.max(0.01)
    }

    /// Visible world rectangle, excluding shake.
    pub fn view_rect(&self) -> Rect {
        let size = self.view_size();
        let origin = self.position - size * 0.5;
        Rect::new(origin.x, origin.y, size.x, size.y)
    }

    /// Centre on `target`, then clamp so the view stays inside a world of
    /// `world` size. A world smaller than the view pins the view to the
    /// world's top-left corner.
    pub fn follow(&mut self, target: Vec2, world: Vec2) {
        self.world = Some(world);
        self.position = self.clamped(target, world);
    }

    fn clamped(&self, target: Vec2, world: Vec2) -> Vec2 {
        let half = self.view_size() * 0.5;
        Vec2::new(clamp_axis(target.x, half.x, world.x), clamp_axis(target.y, half.y, world.y))
    }

    /// Advance camera animations by `dt` seconds:
    /// - Smooth zoom lerps toward `target_zoom`, re-clamping the view.
    /// - Shake displacement decays and oscillates.
    pub fn tick(&mut self, dt: f32) {
        // Smooth zoom interpolation (converges at ~8× per second).
        let speed = 8.0_f32;
        self.zoom += (self.target_zoom - self.zoom) * (speed * dt).min(1.0);
        if let Some(world) = self.world {
            self.position = self.clamped(self.position, world);
        }

        // Camera shake: high-frequency sinusoidal offset with linear decay.
        if self.shake_timer > 0.0 {
            self.shake_timer -= dt;
            let duration = 0.5_f32;
            let decay = (self.shake_timer / duration).max(0.0);
            let t = self.shake_timer;
            use std::f32::consts::TAU;
            self.shake_offset = Vec2::new(
                (t * 47.0 * TAU).sin() * self.shake_intensity * decay,
                (t * 37.0 * TAU + 1.1).sin() * self.shake_intensity * decay,
            );
            if self.shake_timer <= 0.0 {
                self.shake_timer = 0.0;
                self.shake_offset = Vec2::ZERO;
            }
        }
    }

    /// Trigger a camera shake. `intensity` is the peak displacement in pixels.
    /// Shake lasts 0.5 seconds and decays linearly.
    pub fn shake(&mut self, intensity: f32) {
        self.shake_timer = 0.5;
        self.shake_intensity = intensity;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_timer > 0.0
    }
}

fn clamp_axis(target: f32, half: f32, world: f32) -> f32 {
    if world <= half * 2.0 { half } else { target.clamp(half, world - half) }
}
