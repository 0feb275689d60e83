//! The viewer's single owner of interaction state.
//!
//! `MapViewer` wires input to the pan/zoom controller and the selection
//! machine, arbitrates who writes the camera pose each frame, and keeps the
//! label and info panel in step with the selection.
//!
//! Pose arbitration: while a camera flight is active it is the only writer.
//! Pan/zoom input is dropped for the duration and its residual motion is
//! cleared when the flight starts.

use std::collections::BTreeSet;

use camera::{
    CameraAnimator, CameraPose, DeviceClass, PanZoomController, PerspectiveCamera, Viewport,
    frame_bounds,
};
use foundation::math::{Vec2, Vec3};
use foundation::time::Time;
use layers::{FloatingLabel, InfoDataset, InfoPanel, LabelProjector, display_name};
use runtime::{EventBus, Frame, FrameClock, Stamped};
use scene::entity::RegionId;
use scene::selection::{InteractionState, SelectionMachine, Transition};
use scene::{Region, World};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::events::InteractionEvent;
use crate::hit_test::hit_region;
use crate::snapshot::{CameraView, FrameSnapshot, RegionAppearance, xyz};

/// A press (mouse button or single finger) that may end as a click.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PressSession {
    pub down: Vec2,
    pub last: Vec2,
    /// Region under `down`, resolved when the press started.
    pub region: Option<RegionId>,
}

impl PressSession {
    pub fn displacement(&self, release: Vec2) -> f64 {
        self.down.distance(release)
    }
}

struct ViewProjector<'a> {
    camera: &'a PerspectiveCamera,
    viewport: &'a Viewport,
}

impl LabelProjector for ViewProjector<'_> {
    fn project(&self, world: Vec3) -> Option<Vec2> {
        self.camera.project_to_viewport(world, self.viewport)
    }
}

#[derive(Debug)]
pub struct MapViewer {
    config: ViewerConfig,
    world: World,
    camera: PerspectiveCamera,
    viewport: Viewport,
    touch_primary: bool,
    device: DeviceClass,
    pan_zoom: PanZoomController,
    selection: SelectionMachine,
    animator: CameraAnimator,
    dataset: InfoDataset,
    panel: InfoPanel,
    label: FloatingLabel,
    events: EventBus<InteractionEvent>,
    clock: FrameClock,
    /// Last pointer position in client px; `None` until the pointer first
    /// moves over the page, so nothing is hovered at startup.
    pointer: Option<Vec2>,
    press: Option<PressSession>,
    /// Regions whose appearance changed since the last snapshot.
    changed: BTreeSet<RegionId>,
    attached: bool,
}

impl Default for MapViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl MapViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let viewport = Viewport::default();
        let camera = PerspectiveCamera {
            pose: CameraPose::overview(),
            fov_y_deg: config.fov_y_deg,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
        };
        Self {
            world: World::new(),
            camera,
            viewport,
            touch_primary: false,
            device: DeviceClass::classify(&viewport, false),
            pan_zoom: PanZoomController::new(config.pan_zoom),
            selection: SelectionMachine::new(config.selection),
            animator: CameraAnimator::new(config.flight_duration_s),
            dataset: InfoDataset::default(),
            panel: InfoPanel::default(),
            label: FloatingLabel::new(config.label),
            events: EventBus::new(),
            clock: FrameClock::new(),
            pointer: None,
            press: None,
            changed: BTreeSet::new(),
            attached: true,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn state(&self) -> InteractionState {
        self.selection.state()
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn label(&self) -> &FloatingLabel {
        &self.label
    }

    pub fn dataset(&self) -> &InfoDataset {
        &self.dataset
    }

    pub fn pan_zoom(&self) -> &PanZoomController {
        &self.pan_zoom
    }

    pub fn press(&self) -> Option<&PressSession> {
        self.press.as_ref()
    }

    pub fn is_flying(&self) -> bool {
        self.animator.is_active()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Applies a partial JSON config. On error the current config is kept.
    pub fn configure(&mut self, json: &str) -> Result<()> {
        let config = ViewerConfig::from_json(json).inspect_err(|err| {
            warn!(%err, "configuration rejected");
        })?;
        self.apply_config(config)
    }

    /// Validates and installs `config`; an invalid one leaves everything as is.
    pub fn apply_config(&mut self, config: ViewerConfig) -> Result<()> {
        config.validate()?;
        self.pan_zoom.set_config(config.pan_zoom);
        self.selection.set_style(config.selection);
        self.animator.set_duration_s(config.flight_duration_s);
        self.label.set_config(config.label);
        self.camera.fov_y_deg = config.fov_y_deg;
        self.camera.near = config.near;
        self.camera.far = config.far;
        self.config = config;
        debug!(config = ?self.config, "configuration applied");
        Ok(())
    }

    pub fn set_dataset(&mut self, dataset: InfoDataset) {
        info!(records = dataset.len(), "info dataset attached");
        self.dataset = dataset;
    }

    /// Parses and attaches a JSON dataset; returns the record count.
    pub fn load_dataset_json(&mut self, json: &str) -> Result<usize> {
        let dataset = InfoDataset::from_json(json).map_err(ViewerError::Dataset)?;
        let len = dataset.len();
        self.set_dataset(dataset);
        Ok(len)
    }

    /// Adds or replaces a pickable region. A replaced region that was
    /// highlighted is restored and forgotten first.
    pub fn register_region(&mut self, region: Region) -> Result<()> {
        if !region.base_bounds.is_valid() {
            warn!(id = %region.id, name = %region.name, "region with invalid bounds skipped");
            return Err(ViewerError::InvalidRegion {
                id: region.id.index(),
            });
        }
        let id = region.id;
        if self.world.contains(id) {
            if self.selection.state().region() == Some(id) {
                self.drive(|selection, world| selection.clear(world));
            }
            self.selection.forget(&mut self.world, id);
        }
        debug!(%id, name = %region.name, "region registered");
        self.world.insert(region);
        self.changed.insert(id);
        Ok(())
    }

    /// Registers a batch. Invalid regions are skipped (and logged); returns
    /// how many were registered.
    pub fn register_regions(&mut self, regions: impl IntoIterator<Item = Region>) -> usize {
        let mut count = 0;
        let mut skipped = 0;
        for region in regions {
            match self.register_region(region) {
                Ok(()) => count += 1,
                Err(_) => skipped += 1,
            }
        }
        info!(count, skipped, total = self.world.len(), "regions registered");
        count
    }

    /// New canvas rectangle. Everything derived from it is recomputed from
    /// scratch, so repeated calls with the same rectangle are no-ops.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.reclassify();
    }

    /// Whether the host's primary pointer is coarse (touch).
    pub fn set_touch_primary(&mut self, touch_primary: bool) {
        self.touch_primary = touch_primary;
        self.reclassify();
    }

    pub fn on_pointer_move(&mut self, client: Vec2) {
        if !self.attached {
            return;
        }
        self.pointer = Some(client);
        if let Some(press) = self.press.as_mut() {
            press.last = client;
        }
        if !self.animator.is_active() {
            self.pan_zoom.on_move(&mut self.camera.pose, client);
        }
    }

    /// Pointer left the page; the next frame drops any hover.
    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn on_pointer_down(&mut self, client: Vec2) {
        if !self.attached {
            return;
        }
        self.pointer = Some(client);
        self.begin_press(client);
        if !self.animator.is_active() {
            self.pan_zoom.on_press(client);
        }
    }

    pub fn on_pointer_up(&mut self, client: Vec2) {
        if !self.attached {
            return;
        }
        self.pan_zoom.on_release();
        self.end_press(client);
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        if !self.attached || self.animator.is_active() {
            return;
        }
        self.pan_zoom.on_wheel(delta_y);
    }

    /// `touches` are every touch currently down, in client px.
    pub fn on_touch_start(&mut self, touches: &[Vec2]) {
        if !self.attached {
            return;
        }
        match touches {
            [one] => self.begin_press(*one),
            _ => self.press = None,
        }
        if !self.animator.is_active() {
            self.pan_zoom.on_touch_start(touches);
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Vec2]) {
        if !self.attached {
            return;
        }
        if let ([one], Some(press)) = (touches, self.press.as_mut()) {
            press.last = *one;
        }
        if !self.animator.is_active() {
            self.pan_zoom.on_touch_move(&mut self.camera.pose, touches);
        }
    }

    /// `remaining` are the touches still down after the end event.
    pub fn on_touch_end(&mut self, remaining: &[Vec2]) {
        if !self.attached {
            return;
        }
        self.pan_zoom.on_touch_end(remaining);
        if remaining.is_empty()
            && let Some(press) = self.press
        {
            self.end_press(press.last);
        }
    }

    /// Resolves a click or tap on `region` (or on empty space).
    pub fn click(&mut self, region: Option<RegionId>) {
        self.drive(|selection, world| selection.click(world, region));
    }

    /// Selects a region by internal name, as if it had been clicked.
    /// Returns `false` for unknown names.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let Some(id) = self.world.find_by_name(name).map(|r| r.id) else {
            debug!(name, "select by name: no such region");
            return false;
        };
        if self.selection.selected() != Some(id) {
            self.click(Some(id));
        }
        true
    }

    /// Close button: hides the panel and drops the selection.
    pub fn close_panel(&mut self) {
        if self.selection.selected().is_some() {
            self.drive(|selection, world| selection.clear(world));
        }
        self.panel.hide();
        self.label.hide();
    }

    /// One display frame at host time `now`.
    pub fn frame(&mut self, now: Time) -> Frame {
        let frame = self.clock.tick(now);
        if !self.attached {
            return frame;
        }

        match self.animator.step(now) {
            Some(step) => {
                self.camera.pose = step.pose;
                if step.finished {
                    self.emit(InteractionEvent::FlightFinished);
                }
            }
            None => self.pan_zoom.update(&mut self.camera.pose),
        }

        self.update_hover();

        let projector = ViewProjector {
            camera: &self.camera,
            viewport: &self.viewport,
        };
        self.label.update(frame.dt_s, &projector);
        frame
    }

    /// Render state for the current frame. Region appearances are reported
    /// once per change.
    pub fn take_snapshot(&mut self) -> FrameSnapshot {
        let regions = std::mem::take(&mut self.changed)
            .into_iter()
            .filter_map(|id| self.world.get(id))
            .map(RegionAppearance::from)
            .collect();
        FrameSnapshot {
            frame: self.clock.current().index,
            camera: CameraView {
                position: xyz(self.camera.pose.position),
                target: xyz(self.camera.pose.target),
                fov_y_deg: self.camera.fov_y_deg,
                near: self.camera.near,
                far: self.camera.far,
            },
            state: self.selection.state().into(),
            regions,
            label: self.label.view(),
            flying: self.animator.is_active(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<InteractionEvent>> {
        self.events.drain()
    }

    /// Resumes input and frame processing after [`MapViewer::detach`].
    pub fn attach(&mut self) {
        self.attached = true;
        self.pan_zoom.set_enabled(true);
    }

    /// Teardown: stops motion and ignores all further input and frames.
    pub fn detach(&mut self) {
        self.attached = false;
        self.pan_zoom.detach();
        self.animator.cancel();
        self.press = None;
        self.pointer = None;
        debug!("viewer detached");
    }

    fn begin_press(&mut self, at: Vec2) {
        let region = hit_region(&self.world, &self.camera, &self.viewport, at);
        self.press = Some(PressSession {
            down: at,
            last: at,
            region,
        });
    }

    fn end_press(&mut self, at: Vec2) {
        let Some(press) = self.press.take() else {
            return;
        };
        let moved = press.displacement(at);
        if moved > self.config.click_threshold_px {
            debug!(moved, "press ended as a drag");
            return;
        }
        self.click(press.region);
    }

    fn update_hover(&mut self) {
        if !self.device.hover_enabled() || self.selection.selected().is_some() {
            return;
        }
        let target = self
            .pointer
            .and_then(|p| hit_region(&self.world, &self.camera, &self.viewport, p));
        self.drive(|selection, world| selection.hover(world, target));
    }

    fn reclassify(&mut self) {
        self.device = DeviceClass::classify(&self.viewport, self.touch_primary);
        if !self.device.hover_enabled() && self.selection.hovered().is_some() {
            self.drive(|selection, world| selection.clear(world));
        }
    }

    /// Runs one selection-machine operation and reacts to its outcome.
    fn drive<F>(&mut self, op: F)
    where
        F: FnOnce(&mut SelectionMachine, &mut World) -> Transition,
    {
        self.changed.extend(self.selection.state().region());
        let transition = op(&mut self.selection, &mut self.world);
        self.changed.extend(self.selection.state().region());

        match transition {
            Transition::Unchanged => {}
            Transition::HoverChanged { from, to } => {
                self.emit(InteractionEvent::HoverChanged { from, to });
            }
            Transition::Selected { region, previous } => {
                self.emit(InteractionEvent::Selected { region, previous });
                self.focus(region);
            }
            Transition::Deselected { region } => {
                self.emit(InteractionEvent::Deselected { region });
                self.panel.hide();
                self.label.hide();
                self.fly_to(CameraPose::overview());
            }
        }
    }

    /// Frames `id`, fills the panel and pins the label.
    fn focus(&mut self, id: RegionId) {
        let Some(region) = self.world.get(id) else {
            return;
        };
        let bounds = region.world_bounds();
        let title = display_name(&region.name);

        let goal = frame_bounds(
            &bounds,
            self.camera.fov_y_deg,
            self.camera.aspect,
            self.device.layout,
            &self.config.framing,
        );

        let entries = self.dataset.lookup(&title).to_vec();
        if entries.is_empty() {
            debug!(%title, "no info records");
        }
        self.panel.show(title.clone(), entries);

        let projector = ViewProjector {
            camera: &self.camera,
            viewport: &self.viewport,
        };
        self.label.show(title, bounds.top_center(), &projector);

        self.fly_to(goal);
    }

    fn fly_to(&mut self, goal: CameraPose) {
        if !goal.is_finite() {
            warn!(?goal, "non-finite camera goal ignored");
            return;
        }
        self.pan_zoom.stop();
        self.animator.start(self.camera.pose, goal);
        self.emit(InteractionEvent::FlightStarted { goal });
    }

    fn emit(&mut self, event: InteractionEvent) {
        let frame = self.clock.current();
        self.events.emit(frame, event);
    }
}
