//! Card canvas: the composition layer.
//!
//! `CardCanvas` owns the authoritative element list, the canvas size and
//! the interaction settings. Pointer and keyboard input is routed to the
//! drag and resize controllers; their results are applied back to the
//! element list here, so the controllers never hold more than transient
//! gesture state.
//!
//! Every mutation bumps [`CardCanvas::revision`]; the host re-renders when
//! it changes.

use crate::config::CanvasConfig;
use crate::drag::{DragContext, DragController};
use crate::frame::FrameQueue;
use crate::input::{InputEvent, Modifiers, PointerSample, PointerSource};
use crate::listeners::{ListenerHost, ListenerSet};
use crate::render::{RenderFrame, RenderGuide, render_item};
use crate::resize::{ResizeCommit, ResizeController, ResizeUpdate};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::template::TemplateLayout;
use invite_core::hit::{hit_test, hit_test_handle, paint_order};
use invite_core::layout::clamp_axis;
use invite_core::resize::{BoxConstraints, resize_box};
use invite_core::{
    CanvasSize, Element, ElementId, ElementKind, FontScaleConfig, FontSizer, Guide, LayoutSnapshot,
    MeasureBackend, Point, ResizeHandle, ResizeMode, Size, SnapTarget, ZOrder, clamp_position, measure,
};
use smallvec::SmallVec;
use std::rc::Rc;

pub struct CardCanvas {
    elements: Vec<Element>,
    canvas: CanvasSize,
    config: CanvasConfig,
    selected: Option<ElementId>,

    /// Template layout restored by `reset_layout`.
    defaults: LayoutSnapshot,

    measurer: Box<dyn MeasureBackend>,
    fonts: FontSizer,

    drag: DragController,
    resize: ResizeController,
    frames: FrameQueue<PointerSample>,
    listeners: Rc<ListenerSet>,

    /// Guides and snap description of the current drag tick.
    guides: SmallVec<[Guide; 4]>,
    snap_description: Option<String>,

    revision: u64,
}

impl CardCanvas {
    pub fn new(canvas: CanvasSize, measurer: Box<dyn MeasureBackend>) -> Self {
        Self {
            elements: Vec::new(),
            canvas,
            config: CanvasConfig::default(),
            selected: None,
            defaults: LayoutSnapshot::default(),
            measurer,
            fonts: FontSizer::new(),
            drag: DragController::new(),
            resize: ResizeController::new(),
            frames: FrameQueue::new(),
            listeners: Rc::new(ListenerSet::new()),
            guides: SmallVec::new(),
            snap_description: None,
            revision: 0,
        }
    }

    /// Build a canvas seeded from a template. The resulting layout becomes
    /// the snapshot `reset_layout` restores.
    pub fn from_template(template: &TemplateLayout, measurer: Box<dyn MeasureBackend>) -> Self {
        let canvas = CanvasSize::new(template.canvas_width, template.canvas_height);
        let mut card = Self::new(canvas, measurer);
        for spec in &template.elements {
            let (element, font_config) = spec.build();
            card.add_element(element, font_config);
        }
        card.defaults = LayoutSnapshot::capture(&card.elements);
        log::debug!("seeded {} elements from template", card.elements.len());
        card
    }

    // ─── Configuration ───────────────────────────────────────────────────

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Positions are center-relative, so a host resize only changes the
    /// clamping bounds; stored positions are left untouched.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        if self.canvas != canvas {
            self.canvas = canvas;
            self.touch();
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CanvasConfig) {
        self.config = config;
        self.touch();
    }

    /// Replace the template defaults used by `reset_layout`.
    pub fn set_defaults(&mut self, defaults: LayoutSnapshot) {
        self.defaults = defaults;
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn snap_description(&self) -> Option<&str> {
        self.snap_description.as_deref()
    }

    pub fn font_config(&self, id: ElementId) -> Option<&FontScaleConfig> {
        self.fonts.config(id)
    }

    /// Uncommitted font size of the text element being resized.
    pub fn font_preview(&self) -> Option<(ElementId, u32)> {
        self.resize.live_font()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    /// Global listeners the host should currently have attached.
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Index of `id`, warning when it is not on the canvas.
    fn require(&self, id: ElementId, op: &str) -> Option<usize> {
        let idx = self.index_of(id);
        if idx.is_none() {
            log::warn!("{op}: unknown element {id}");
        }
        idx
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn remeasure(&mut self, idx: usize) {
        let measurer = self.measurer.as_ref();
        let el = &mut self.elements[idx];
        if let ElementKind::Text {
            content,
            font,
            max_width,
        } = &el.kind
        {
            el.size = measure(measurer, content, font, *max_width);
        }
    }

    // ─── Structure ───────────────────────────────────────────────────────

    /// Place `element` on the canvas. Text elements are measured and, with a
    /// `font_config`, registered with the font sizing engine. Returns `false`
    /// if the id is already taken.
    pub fn add_element(&mut self, mut element: Element, font_config: Option<FontScaleConfig>) -> bool {
        if self.index_of(element.id).is_some() {
            log::warn!("add_element: duplicate id {}", element.id);
            return false;
        }
        element.position = clamp_position(element.position, self.canvas, self.config.edge_padding);
        if let (Some(config), ElementKind::Text { font, .. }) = (font_config, &mut element.kind) {
            font.size = config.clamp(font.size);
            self.fonts.register(element.id, config, font.size);
        }
        let id = element.id;
        self.elements.push(element);
        self.remeasure(self.elements.len() - 1);
        log::debug!("added {id}");
        self.touch();
        true
    }

    /// Select `id`, or clear the selection with `None`. Selection is
    /// exclusive; unknown ids leave it unchanged.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        if let Some(id) = id
            && self.require(id, "select_element").is_none()
        {
            return false;
        }
        if self.selected != id {
            log::debug!("selection {:?} -> {:?}", self.selected, id);
            self.selected = id;
            self.touch();
        }
        true
    }

    fn is_selected(&self, id: ElementId, op: &str) -> bool {
        if self.selected == Some(id) {
            true
        } else {
            log::debug!("{op}: {id} is not selected");
            false
        }
    }

    /// Delete the selected element. Locked elements stay.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        if !self.is_selected(id, "delete_element") {
            return false;
        }
        let Some(idx) = self.require(id, "delete_element") else {
            return false;
        };
        if self.elements[idx].locked {
            log::debug!("delete_element: {id} is locked");
            return false;
        }
        self.drop_gesture_on(id);
        self.elements.remove(idx);
        self.fonts.unregister(id);
        self.selected = None;
        log::debug!("deleted {id}");
        self.touch();
        true
    }

    /// Copy the selected element, offset by `duplicate_offset`, on top of
    /// the stack. The copy is unlocked and becomes the selection.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.is_selected(id, "duplicate_element") {
            return None;
        }
        let idx = self.require(id, "duplicate_element")?;
        let mut copy = self.elements[idx].clone();
        copy.id = ElementId::derived(id.as_str());
        let offset = self.config.duplicate_offset;
        copy.position = clamp_position(
            copy.position.offset(offset, offset),
            self.canvas,
            self.config.edge_padding,
        );
        copy.locked = false;
        copy.z_index = self.top_z() + 1;

        let copy_id = copy.id;
        if let (Some(config), Some(font_size)) = (self.fonts.config(id).copied(), copy.font_size()) {
            self.fonts.register(copy_id, config, font_size);
        }
        self.elements.push(copy);
        self.selected = Some(copy_id);
        log::debug!("duplicated {id} as {copy_id}");
        self.touch();
        Some(copy_id)
    }

    /// Flip the lock on the selected element. Returns the new lock state.
    pub fn toggle_lock(&mut self, id: ElementId) -> Option<bool> {
        if !self.is_selected(id, "toggle_lock") {
            return None;
        }
        let idx = self.require(id, "toggle_lock")?;
        let locked = !self.elements[idx].locked;
        if locked {
            self.drop_gesture_on(id);
        }
        self.elements[idx].locked = locked;
        log::debug!("{id} locked: {locked}");
        self.touch();
        Some(locked)
    }

    fn top_z(&self) -> i32 {
        self.elements.iter().map(|el| el.z_index).max().unwrap_or(0)
    }

    /// Move `id` within the stacking order. Z indices are renumbered to
    /// consecutive ranks afterwards.
    pub fn set_z_index(&mut self, id: ElementId, direction: ZOrder) -> bool {
        if self.require(id, "set_z_index").is_none() {
            return false;
        }
        let mut order = paint_order(&self.elements);
        let Some(from) = order.iter().position(|&i| self.elements[i].id == id) else {
            return false;
        };
        let last = order.len() - 1;
        let to = match direction {
            ZOrder::Forward => (from + 1).min(last),
            ZOrder::Backward => from.saturating_sub(1),
            ZOrder::ToFront => last,
            ZOrder::ToBack => 0,
        };
        let moved = order.remove(from);
        order.insert(to, moved);
        for (rank, &i) in order.iter().enumerate() {
            self.elements[i].z_index = rank as i32;
        }
        log::debug!("z-order {id} {direction:?}: {from} -> {to}");
        self.touch();
        true
    }

    // ─── Layout edits ────────────────────────────────────────────────────

    /// Move `id` to `position`, clamped inside the canvas padding.
    pub fn move_element(&mut self, id: ElementId, position: Point) -> bool {
        let Some(idx) = self.require(id, "move_element") else {
            return false;
        };
        let clamped = clamp_position(position, self.canvas, self.config.edge_padding);
        let el = &mut self.elements[idx];
        if el.position != clamped {
            el.position = clamped;
            log::trace!("move {id} -> {clamped:?}");
            self.touch();
        }
        true
    }

    /// Resize `id`. Box elements take `size` within their constraints; text
    /// elements map the width to a font size and re-measure.
    pub fn resize_element(&mut self, id: ElementId, size: Size) -> bool {
        let Some(idx) = self.require(id, "resize_element") else {
            return false;
        };
        let el = &self.elements[idx];
        match el.caps.resize {
            ResizeMode::None => {
                log::debug!("resize_element: {id} is not resizable");
                false
            }
            ResizeMode::Font => {
                if self.fonts.config(id).is_none() {
                    log::debug!("resize_element: {id} has no font scaling config");
                    return false;
                }
                let font_size = self.fonts.font_size_for_width(id, size.width);
                self.apply_font_size(idx, font_size);
                true
            }
            ResizeMode::Box => {
                let aspect = (el.caps.aspect_locked && el.size.height > 0.0)
                    .then(|| el.size.width / el.size.height);
                let constraints = BoxConstraints {
                    min: el.caps.min_size,
                    max: el.caps.max_size,
                    aspect_ratio: aspect,
                    grid: self.config.grid(),
                };
                let size = resize_box(ResizeHandle::SE, size, 0.0, 0.0, &constraints);
                self.apply_size(idx, size);
                true
            }
        }
    }

    /// Set the font size of text element `id`, clamped to its configured
    /// bounds, and re-measure.
    pub fn set_font_size(&mut self, id: ElementId, font_size: u32) -> bool {
        let Some(idx) = self.require(id, "set_font_size") else {
            return false;
        };
        if !self.elements[idx].is_text() {
            log::debug!("set_font_size: {id} is not text");
            return false;
        }
        let font_size = match self.fonts.config(id) {
            Some(config) => config.clamp(font_size),
            None => font_size.max(1),
        };
        self.fonts.track(id, font_size);
        self.apply_font_size(idx, font_size);
        true
    }

    fn apply_font_size(&mut self, idx: usize, font_size: u32) {
        if let ElementKind::Text { font, .. } = &mut self.elements[idx].kind {
            font.size = font_size;
        }
        self.remeasure(idx);
        log::trace!("font {} -> {font_size}px", self.elements[idx].id);
        self.touch();
    }

    fn apply_size(&mut self, idx: usize, size: Size) {
        let el = &mut self.elements[idx];
        if el.size != size {
            el.size = size;
            log::trace!("size {} -> {size:?}", el.id);
            self.touch();
        }
    }

    /// Restore every element found in the template defaults. Elements added
    /// after seeding are left where they are.
    pub fn reset_layout(&mut self) {
        self.cancel_gesture();
        let defaults = std::mem::take(&mut self.defaults);
        let restored = self.apply_snapshot(&defaults);
        self.defaults = defaults;
        log::debug!("reset {restored} elements to template layout");
        self.touch();
    }

    /// Apply a layout snapshot. Returns how many elements it touched.
    fn apply_snapshot(&mut self, snapshot: &LayoutSnapshot) -> usize {
        let mut applied = 0;
        for (key, layout) in &snapshot.elements {
            let Some(idx) = ElementId::lookup(key).and_then(|id| self.index_of(id)) else {
                log::warn!("layout entry for unknown element {key}");
                continue;
            };
            let position = clamp_position(
                Point::new(layout.x, layout.y),
                self.canvas,
                self.config.edge_padding,
            );
            self.elements[idx].position = position;

            let el = &self.elements[idx];
            if el.is_text() {
                if let Some(font_size) = layout.font_size {
                    let id = el.id;
                    let font_size = self.fonts.config(id).map_or(font_size, |c| c.clamp(font_size));
                    self.fonts.track(id, font_size);
                    if let ElementKind::Text { font, .. } = &mut self.elements[idx].kind {
                        font.size = font_size;
                    }
                }
                self.remeasure(idx);
            } else {
                let (min, max) = (el.caps.min_size, el.caps.max_size);
                self.elements[idx].size = Size::new(
                    clamp_axis(layout.width, min.width, max.width),
                    clamp_axis(layout.height, min.height, max.height),
                );
            }
            applied += 1;
        }
        applied
    }

    // ─── Content edits ───────────────────────────────────────────────────

    fn edit_text(
        &mut self,
        id: ElementId,
        op: &str,
        edit: impl FnOnce(&mut String, &mut invite_core::FontSpec, &mut Option<f32>),
    ) -> bool {
        let Some(idx) = self.require(id, op) else {
            return false;
        };
        let ElementKind::Text {
            content,
            font,
            max_width,
        } = &mut self.elements[idx].kind
        else {
            log::debug!("{op}: {id} is not text");
            return false;
        };
        edit(content, font, max_width);
        self.remeasure(idx);
        self.touch();
        true
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        self.edit_text(id, "set_text", |content, _, _| *content = text.to_string())
    }

    pub fn set_font_family(&mut self, id: ElementId, family: &str) -> bool {
        self.edit_text(id, "set_font_family", |_, font, _| font.family = family.to_string())
    }

    pub fn set_font_weight(&mut self, id: ElementId, weight: u16) -> bool {
        self.edit_text(id, "set_font_weight", |_, font, _| font.weight = weight.clamp(100, 900))
    }

    /// Wrap width for a text element; `None` measures a single run per line.
    pub fn set_max_width(&mut self, id: ElementId, max_width: Option<f32>) -> bool {
        let max_width = max_width.filter(|w| w.is_finite() && *w > 0.0);
        self.edit_text(id, "set_max_width", |_, _, wrap| *wrap = max_width)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down at canvas pixel `(x, y)`. Handles of the selected
    /// element start a resize; otherwise the topmost element under the
    /// pointer is selected and, unless locked, starts dragging. A miss
    /// clears the selection.
    pub fn pointer_down(&mut self, x: f32, y: f32, source: PointerSource, _modifiers: Modifiers) -> bool {
        if !source.starts_gesture() || self.drag.is_active() || self.resize.is_active() {
            return false;
        }
        let host: Rc<dyn ListenerHost> = self.listeners.clone();

        if let Some(idx) = self.selected.and_then(|id| self.index_of(id)) {
            let el = &self.elements[idx];
            if !el.locked
                && let Some(handle) = hit_test_handle(el, self.canvas, x, y)
            {
                let font_config = self.fonts.config(el.id).copied();
                let started = self
                    .resize
                    .begin(el, handle, (x, y), font_config, self.config.grid(), source, &host);
                if started {
                    self.touch();
                }
                return started;
            }
        }

        match hit_test(&self.elements, self.canvas, x, y) {
            Some(id) => {
                self.select_element(Some(id));
                if let Some(idx) = self.index_of(id) {
                    self.drag.begin(&self.elements[idx], (x, y), source, &host);
                }
                true
            }
            None => {
                self.select_element(None);
                false
            }
        }
    }

    /// Record a pointer move. Returns `true` when the host must request an
    /// animation frame; the move is applied in [`Self::animation_frame`].
    pub fn pointer_move(&mut self, x: f32, y: f32, modifiers: Modifiers) -> bool {
        let Some(id) = self.drag.active_id().or(self.resize.active_id()) else {
            return false;
        };
        self.frames.schedule(id, PointerSample::new(x, y, modifiers))
    }

    /// Apply the moves coalesced since the last frame.
    pub fn animation_frame(&mut self) {
        for (id, sample) in self.frames.take_frame() {
            self.apply_sample(id, sample);
        }
    }

    fn apply_sample(&mut self, id: ElementId, sample: PointerSample) {
        if self.drag.active_id() == Some(id) {
            let Some(idx) = self.index_of(id) else {
                return;
            };
            let siblings: Vec<SnapTarget> = self
                .elements
                .iter()
                .filter(|el| el.id != id)
                .map(|el| SnapTarget {
                    id: el.id,
                    position: el.position,
                    size: el.size,
                })
                .collect();
            let ctx = DragContext {
                canvas: self.canvas,
                config: &self.config,
                element_size: self.elements[idx].size,
                siblings: &siblings,
            };
            if let Some((_, result)) = self.drag.update(sample, &ctx) {
                self.elements[idx].position = result.position;
                self.guides = result.guides;
                self.snap_description = result.description;
                self.touch();
            }
        } else if self.resize.active_id() == Some(id) {
            match self.resize.update(sample) {
                Some((_, ResizeUpdate::Size(size))) => {
                    if let Some(idx) = self.index_of(id) {
                        self.apply_size(idx, size);
                    }
                }
                // Font sizes are previewed only; the element changes on pointer-up.
                Some((_, ResizeUpdate::Font { .. })) => self.touch(),
                None => {}
            }
        }
    }

    /// Pointer up: apply any pending frame, then finish the gesture.
    pub fn pointer_up(&mut self) -> bool {
        self.flush_frames();
        if self.drag.end().is_some() {
            self.clear_guides();
            self.touch();
            return true;
        }
        match self.resize.end() {
            Some(commit) => {
                self.apply_commit(commit);
                true
            }
            None => false,
        }
    }

    /// Abort the active drag or resize and restore the gesture-start state.
    pub fn cancel_gesture(&mut self) -> bool {
        self.frames.clear();
        if let Some((id, start)) = self.drag.cancel() {
            if let Some(idx) = self.index_of(id) {
                self.elements[idx].position = start;
            }
            self.clear_guides();
            self.touch();
            return true;
        }
        match self.resize.cancel() {
            Some(commit) => {
                self.apply_commit(commit);
                true
            }
            None => false,
        }
    }

    fn apply_commit(&mut self, commit: ResizeCommit) {
        match commit {
            ResizeCommit::Size { id, size } => {
                if let Some(idx) = self.index_of(id) {
                    self.apply_size(idx, size);
                }
            }
            ResizeCommit::Font { id, font_size } => {
                self.set_font_size(id, font_size);
            }
        }
        self.touch();
    }

    /// Drop a gesture on `id` without applying anything, e.g. when the
    /// element is deleted or locked mid-gesture.
    fn drop_gesture_on(&mut self, id: ElementId) {
        self.frames.discard(id);
        if self.drag.active_id() == Some(id) {
            self.drag.cancel();
            self.clear_guides();
        }
        if self.resize.active_id() == Some(id) {
            self.resize.cancel();
        }
    }

    fn clear_guides(&mut self) {
        self.guides.clear();
        self.snap_description = None;
    }

    /// Commit any pending animation frame right away.
    pub fn flush_frames(&mut self) {
        if !self.frames.is_empty() {
            self.animation_frame();
        }
    }

    /// `true` when no animation frame is pending, i.e. the element list
    /// reflects every pointer event received so far.
    pub fn is_settled(&self) -> bool {
        self.frames.is_empty()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    pub fn key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };

        if action == ShortcutAction::Escape {
            if self.cancel_gesture() {
                return true;
            }
            return self.selected.is_some() && self.select_element(None);
        }

        // Everything else acts on the selection and waits for gestures to end.
        let Some(id) = self.selected else {
            return false;
        };
        if self.drag.is_active() || self.resize.is_active() {
            return false;
        }

        match action {
            ShortcutAction::Delete => self.delete_element(id),
            ShortcutAction::Duplicate => self.duplicate_element(id).is_some(),
            ShortcutAction::ToggleLock => self.toggle_lock(id).is_some(),
            ShortcutAction::SendBackward => self.set_z_index(id, ZOrder::Backward),
            ShortcutAction::BringForward => self.set_z_index(id, ZOrder::Forward),
            ShortcutAction::SendToBack => self.set_z_index(id, ZOrder::ToBack),
            ShortcutAction::BringToFront => self.set_z_index(id, ZOrder::ToFront),
            ShortcutAction::Nudge { dx, dy, large } => self.nudge(id, dx, dy, large),
            ShortcutAction::Escape => false,
        }
    }

    fn nudge(&mut self, id: ElementId, dx: i8, dy: i8, large: bool) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if el.locked {
            return false;
        }
        let step = if large {
            self.config.nudge_step_large
        } else {
            self.config.nudge_step
        };
        let target = el.position.offset(f32::from(dx) * step, f32::from(dy) * step);
        self.move_element(id, target)
    }

    /// Route a normalized input event.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                source,
                modifiers,
            } => self.pointer_down(*x, *y, *source, *modifiers),
            InputEvent::PointerMove { x, y, modifiers } => self.pointer_move(*x, *y, *modifiers),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers),
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn layout_snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.elements)
    }

    pub fn layout_json(&self) -> Result<String, String> {
        self.layout_snapshot().to_json().map_err(|e| e.to_string())
    }

    /// Restore a stored layout. Returns the number of elements updated.
    pub fn load_layout_json(&mut self, json: &str) -> Result<usize, String> {
        let snapshot = LayoutSnapshot::from_json(json).map_err(|e| e.to_string())?;
        self.cancel_gesture();
        let applied = self.apply_snapshot(&snapshot);
        log::debug!("loaded layout for {applied} elements");
        self.touch();
        Ok(applied)
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render_items(&self) -> RenderFrame {
        let preview = self.resize.live_font();
        let items = paint_order(&self.elements)
            .into_iter()
            .map(|i| {
                let el = &self.elements[i];
                let preview_font = preview.and_then(|(id, size)| (id == el.id).then_some(size));
                render_item(
                    el,
                    self.canvas,
                    self.measurer.as_ref(),
                    self.selected == Some(el.id),
                    preview_font,
                )
            })
            .collect();
        RenderFrame {
            revision: self.revision,
            width: self.canvas.width,
            height: self.canvas.height,
            items,
            guides: self
                .guides
                .iter()
                .map(|g| RenderGuide::from_guide(g, self.canvas))
                .collect(),
            description: self.snap_description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerKind;
    use invite_core::{ApproxMetrics, FontSpec};

    fn canvas() -> CardCanvas {
        CardCanvas::new(CanvasSize::new(800.0, 600.0), Box::new(ApproxMetrics::default()))
    }

    fn photo(id: &str) -> Element {
        Element::image(id, "p.jpg", Size::new(100.0, 100.0))
    }

    #[test]
    fn selection_is_exclusive() {
        let mut card = canvas();
        let a = photo("sel-a");
        let b = photo("sel-b").at(200.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        card.add_element(a, None);
        card.add_element(b, None);

        card.select_element(Some(a_id));
        card.select_element(Some(b_id));
        assert_eq!(card.selected(), Some(b_id));
        assert!(!card.select_element(Some(ElementId::intern("sel-missing"))));
        assert_eq!(card.selected(), Some(b_id));
    }

    #[test]
    fn delete_requires_selection() {
        let mut card = canvas();
        let el = photo("del-a");
        let id = el.id;
        card.add_element(el, None);
        assert!(!card.delete_element(id));
        card.select_element(Some(id));
        assert!(card.delete_element(id));
        assert!(card.elements().is_empty());
        assert_eq!(card.selected(), None);
    }

    #[test]
    fn move_is_clamped() {
        let mut card = canvas();
        let el = photo("move-a");
        let id = el.id;
        card.add_element(el, None);
        card.move_element(id, Point::new(-1000.0, 1000.0));
        assert_eq!(card.element(id).unwrap().position, Point::new(-380.0, 280.0));
    }

    #[test]
    fn text_is_measured_on_add() {
        let mut card = canvas();
        let el = Element::text("measure-title", "Anna", FontSpec::default());
        let id = el.id;
        card.add_element(el, None);
        let size = card.element(id).unwrap().size;
        assert_ne!(size, Size::new(100.0, 30.0));
        assert_eq!(size.width.fract(), 0.0);
    }

    #[test]
    fn z_order_renumbers() {
        let mut card = canvas();
        for id in ["z-a", "z-b", "z-c"] {
            card.add_element(photo(id), None);
        }
        let a = ElementId::intern("z-a");
        card.set_z_index(a, ZOrder::ToFront);
        let z: Vec<i32> = card.elements().iter().map(|el| el.z_index).collect();
        assert_eq!(z, vec![2, 0, 1]);

        card.set_z_index(a, ZOrder::Backward);
        let z: Vec<i32> = card.elements().iter().map(|el| el.z_index).collect();
        assert_eq!(z, vec![1, 0, 2]);
    }

    #[test]
    fn drag_gesture_attaches_and_releases_listeners() {
        let mut card = canvas();
        card.add_element(photo("listen-a"), None);
        assert!(card.pointer_down(400.0, 300.0, PointerSource::Mouse, Modifiers::NONE));
        assert!(card.listeners().is_attached(ListenerKind::PointerMove));
        card.pointer_up();
        assert!(card.listeners().is_empty());
    }
}
