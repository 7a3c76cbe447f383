//! Screen-space box selection.
//!
//! The camera pose is captured when the drag starts so that the hit test is
//! stable even if the view keeps animating while the user drags.

use bevy::math::{Mat4, Vec2, Vec3};

use crate::config::MarqueeConfig;
use crate::scene::Scene;
use crate::selection::SelectionItem;

/// Read-only camera pose used for projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl CameraSnapshot {
    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            target,
            fov_y: fov_y_degrees.to_radians(),
        }
    }

    /// Combined projection * view matrix for a canvas of the given size.
    pub fn view_projection(&self, viewport: Vec2, config: &MarqueeConfig) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, self.target, up);
        let aspect = viewport.x.max(1.0) / viewport.y.max(1.0);
        let projection = Mat4::perspective_rh(self.fov_y, aspect, config.near, config.far);
        projection * view
    }
}

/// Projects a world point to screen pixels (origin top-left, y down).
///
/// Returns `None` for points behind the camera or beyond the far plane.
pub fn project_to_screen(view_proj: Mat4, viewport: Vec2, world: Vec3) -> Option<Vec2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= 1e-6 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !ndc.is_finite() || ndc.z < 0.0 || ndc.z > 1.0 {
        return None;
    }
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (0.5 - ndc.y * 0.5) * viewport.y,
    ))
}

/// Axis-aligned screen rectangle: min corner plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        Self {
            min,
            size: a.max(b) - min,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Both sides must exceed the threshold to count as a box.
    pub fn is_box(&self, min_size: f32) -> bool {
        self.size.x > min_size && self.size.y > min_size
    }
}

/// Nodes and unlocked rooms whose anchor projects inside `rect`.
pub fn select_in_rect(
    scene: &Scene,
    camera: &CameraSnapshot,
    viewport: Vec2,
    rect: &ScreenRect,
    config: &MarqueeConfig,
) -> Vec<SelectionItem> {
    let view_proj = camera.view_projection(viewport, config);
    let hit = |world: Vec3| {
        project_to_screen(view_proj, viewport, world).is_some_and(|p| rect.contains(p))
    };

    let nodes = scene
        .nodes
        .iter()
        .filter(|n| !scene.is_node_locked(n))
        .filter(|n| hit(n.position()))
        .map(|n| SelectionItem::node(n.id.clone()));
    let rooms = scene
        .rooms
        .iter()
        .filter(|r| !r.locked)
        .filter(|r| hit(r.center()))
        .map(|r| SelectionItem::room(r.id.clone()));
    nodes.chain(rooms).collect()
}

/// Outcome of releasing a marquee drag.
#[derive(Debug, Clone, PartialEq)]
pub enum MarqueeResult {
    /// Too small or nothing hit: the selection is cleared.
    Cleared,
    Selected(Vec<SelectionItem>),
}

#[derive(Debug, Clone)]
struct MarqueeDrag {
    start: Vec2,
    current: Vec2,
    camera: CameraSnapshot,
    viewport: Vec2,
}

impl MarqueeDrag {
    fn rect(&self) -> ScreenRect {
        ScreenRect::from_corners(self.start, self.current)
    }
}

/// Box-selection gesture state.
#[derive(Debug, Clone, Default)]
pub struct MarqueeProjector {
    drag: Option<MarqueeDrag>,
}

impl MarqueeProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Current rectangle of the in-progress drag.
    pub fn rect(&self) -> Option<ScreenRect> {
        self.drag.as_ref().map(MarqueeDrag::rect)
    }

    pub fn begin(&mut self, point: Vec2, camera: CameraSnapshot, viewport: Vec2) {
        tracing::debug!("[marquee] Begin at {:?}", point);
        self.drag = Some(MarqueeDrag {
            start: point,
            current: point,
            camera,
            viewport,
        });
    }

    /// Updates the rectangle and returns the live preview hit set.
    pub fn update(
        &mut self,
        point: Vec2,
        scene: &Scene,
        config: &MarqueeConfig,
    ) -> Vec<SelectionItem> {
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        if point.is_finite() {
            drag.current = point;
        }
        let rect = drag.rect();
        if !rect.is_box(config.min_size_px) {
            return Vec::new();
        }
        select_in_rect(scene, &drag.camera, drag.viewport, &rect, config)
    }

    /// Ends the drag. Returns `None` if no drag was active.
    pub fn finish(
        &mut self,
        point: Vec2,
        scene: &Scene,
        config: &MarqueeConfig,
    ) -> Option<MarqueeResult> {
        let mut drag = self.drag.take()?;
        if point.is_finite() {
            drag.current = point;
        }
        let rect = drag.rect();
        if !rect.is_box(config.min_size_px) {
            tracing::debug!("[marquee] Rectangle too small, clearing selection");
            return Some(MarqueeResult::Cleared);
        }
        let items = select_in_rect(scene, &drag.camera, drag.viewport, &rect, config);
        tracing::debug!("[marquee] Selected {} items", items.len());
        if items.is_empty() {
            Some(MarqueeResult::Cleared)
        } else {
            Some(MarqueeResult::Selected(items))
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Room};

    const VIEWPORT: Vec2 = Vec2::new(200.0, 200.0);

    fn camera() -> CameraSnapshot {
        // 90 degree fov at distance 10: x = 5 lands at 3/4 of the width.
        CameraSnapshot::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 90.0)
    }

    #[test]
    fn test_projection_known_points() {
        let vp = camera().view_projection(VIEWPORT, &MarqueeConfig::default());
        let center = project_to_screen(vp, VIEWPORT, Vec3::ZERO).unwrap();
        assert!((center - Vec2::new(100.0, 100.0)).length() < 1e-3);
        let right = project_to_screen(vp, VIEWPORT, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((right - Vec2::new(150.0, 100.0)).length() < 1e-3);
        let up = project_to_screen(vp, VIEWPORT, Vec3::new(0.0, 5.0, 0.0)).unwrap();
        assert!((up - Vec2::new(100.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_behind_camera_discarded() {
        let vp = camera().view_projection(VIEWPORT, &MarqueeConfig::default());
        assert!(project_to_screen(vp, VIEWPORT, Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn test_marquee_containment() {
        let mut scene = Scene::default();
        scene.nodes.push(Node::new("center", [0.0, 0.0, 0.0]));
        scene.nodes.push(Node::new("right", [5.0, 0.0, 0.0]));
        scene.nodes.push(Node::new("left", [-5.0, 0.0, 0.0]));
        let config = MarqueeConfig::default();

        let mut marquee = MarqueeProjector::new();
        marquee.begin(Vec2::new(90.0, 90.0), camera(), VIEWPORT);
        let preview = marquee.update(Vec2::new(160.0, 110.0), &scene, &config);
        assert_eq!(preview.len(), 2);

        let result = marquee.finish(Vec2::new(160.0, 110.0), &scene, &config);
        assert_eq!(
            result,
            Some(MarqueeResult::Selected(vec![
                SelectionItem::node("center"),
                SelectionItem::node("right"),
            ]))
        );
        assert!(!marquee.is_active());
    }

    #[test]
    fn test_locked_rooms_never_selected() {
        let mut scene = Scene::default();
        let mut locked = Room::new("locked", [0.0; 3], [1.0; 3]);
        locked.locked = true;
        scene.rooms.push(locked);
        scene.nodes.push(Node::new("inside", [0.0; 3]).in_room("locked"));
        scene.rooms.push(Room::new("open", [1.0, 0.0, 0.0], [1.0; 3]));

        let rect = ScreenRect::from_corners(Vec2::ZERO, VIEWPORT);
        let items = select_in_rect(&scene, &camera(), VIEWPORT, &rect, &MarqueeConfig::default());
        assert_eq!(items, vec![SelectionItem::room("open")]);
    }

    #[test]
    fn test_tiny_rectangle_clears() {
        let mut scene = Scene::default();
        scene.nodes.push(Node::new("center", [0.0; 3]));
        let mut marquee = MarqueeProjector::new();
        marquee.begin(Vec2::new(99.0, 99.0), camera(), VIEWPORT);
        // 3 px is not strictly greater than the threshold.
        let result = marquee.finish(Vec2::new(102.0, 110.0), &scene, &MarqueeConfig::default());
        assert_eq!(result, Some(MarqueeResult::Cleared));
    }

    #[test]
    fn test_empty_hit_clears() {
        let scene = Scene::default();
        let mut marquee = MarqueeProjector::new();
        marquee.begin(Vec2::new(0.0, 0.0), camera(), VIEWPORT);
        let result = marquee.finish(Vec2::new(50.0, 50.0), &scene, &MarqueeConfig::default());
        assert_eq!(result, Some(MarqueeResult::Cleared));
        assert_eq!(marquee.finish(Vec2::ZERO, &scene, &MarqueeConfig::default()), None);
    }
}
