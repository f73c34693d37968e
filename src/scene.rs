//! The editing session: photos, background, stickers and pointer state.
//!
//! A [`Scene`] is created once and reused for every shoot. [`Scene::init`]
//! starts a new session and hands out one [`DecodeTicket`] per photo; decoded
//! photos come back through [`Scene::complete_decode`], possibly out of
//! order. Tickets of an older session are ignored, so a decode that finishes
//! after a retake can never draw onto the new composite.
//!
//! Every render redraws the whole composite. Stickers are only drawn once all
//! photos of the session are decoded, always after the photos.

use crate::error::Result;
use crate::export::{self, Export, IsoDate};
use crate::image::{Backend, Color};
use crate::interaction::{DragMode, Interaction, Point, PointerEvent, StickerId};
use crate::layout::{CellSize, Geometry, Layout};
use crate::logs::LogEvent;
use crate::sticker::Sticker;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// An encoded photo, shared with the host.
pub type Photo = Arc<[u8]>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SceneConfig {
    /// Used in export file names and metadata.
    pub product: String,
    pub cell: CellSize,
    pub padding: i32,
    /// Background of a fresh session.
    pub background: Color,
    pub drag: DragMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            product: String::from("glass-photobooth"),
            cell: CellSize::default(),
            padding: 20,
            background: Color::WHITE,
            drag: DragMode::default(),
        }
    }
}

/// Claim on the decode of one photo of one session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecodeTicket {
    session: u64,
    index: usize,
}

impl DecodeTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    /// Background, photos and stickers were drawn.
    Complete { generation: u64 },
    /// Some photos are still decoding; stickers were left out.
    Partial {
        generation: u64,
        decoded: usize,
        total: usize,
    },
}

macro_rules! log {
    ($scene:expr, $Variant:ident, $($arg:tt)*) => {
        if let Some(tx) = &$scene.log {
            // nobody listening is fine
            let _ = tx.send(LogEvent::$Variant(format!($($arg)*)));
        }
    };
}

pub struct Scene<B: Backend> {
    backend: B,
    config: SceneConfig,
    photos: Vec<Photo>,
    decoded: Vec<Option<B::Image>>,
    layout: Layout,
    geometry: Geometry,
    background: Color,
    stickers: Vec<Sticker>,
    interaction: Interaction,
    last_active: Option<StickerId>,
    session: u64,
    generation: u64,
    rng: StdRng,
    log: Option<Sender<LogEvent>>,
}

impl<B: Backend> Scene<B> {
    pub fn new(backend: B, config: SceneConfig) -> Self {
        let geometry = Geometry::new(Layout::Default.grid(), config.cell, config.padding);
        Self {
            backend,
            background: config.background,
            config,
            photos: Vec::new(),
            decoded: Vec::new(),
            layout: Layout::Default,
            geometry,
            stickers: Vec::new(),
            interaction: Interaction::Idle,
            last_active: None,
            session: 0,
            generation: 0,
            rng: StdRng::from_entropy(),
            log: None,
        }
    }

    /// Makes sticker placement reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_log(mut self, tx: Sender<LogEvent>) -> Self {
        self.log = Some(tx);
        self
    }

    /// Starts a new session, replacing everything from the previous one.
    ///
    /// Photos beyond what `layout` holds are dropped. Returns the tickets of
    /// the photos that still need decoding.
    ///
    /// The session is started before the first render, so when that render
    /// fails the new session stays in place and [`Scene::pending`] still
    /// hands out its tickets.
    pub fn init(&mut self, mut photos: Vec<Photo>, layout: Layout) -> Result<Vec<DecodeTicket>> {
        self.session += 1;
        let expected = layout.photo_count();
        if photos.len() != expected {
            log!(self, Warn, "{layout} holds {expected} photos, got {}", photos.len());
            photos.truncate(expected);
        }
        self.layout = layout;
        self.geometry = Geometry::new(layout.grid(), self.config.cell, self.config.padding);
        self.decoded = photos.iter().map(|_| None).collect();
        self.photos = photos;
        self.stickers.clear();
        self.interaction = Interaction::Idle;
        self.last_active = None;
        self.background = self.config.background;
        log!(
            self,
            Info,
            "session {} started with {} photos in {layout}",
            self.session,
            self.photos.len()
        );
        self.render()?;
        Ok(self.pending())
    }

    /// Clears the scene back to empty. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.session += 1;
        self.photos.clear();
        self.decoded.clear();
        self.stickers.clear();
        self.interaction = Interaction::Idle;
        self.last_active = None;
        self.background = self.config.background;
        self.layout = Layout::Default;
        self.geometry = Geometry::new(self.layout.grid(), self.config.cell, self.config.padding);
        self.backend.clear();
        log!(self, Info, "scene reset");
    }

    /// Tickets of the photos of this session that are not decoded yet.
    pub fn pending(&self) -> Vec<DecodeTicket> {
        self.decoded
            .iter()
            .enumerate()
            .filter(|(_, img)| img.is_none())
            .map(|(index, _)| DecodeTicket {
                session: self.session,
                index,
            })
            .collect()
    }

    /// Encoded photo a ticket refers to, unless the ticket is stale.
    pub fn photo(&self, ticket: DecodeTicket) -> Option<&Photo> {
        (ticket.session == self.session)
            .then(|| self.photos.get(ticket.index))
            .flatten()
    }

    /// Hands a decoded photo back. Returns `false` when the ticket belongs to
    /// an older session, in which case nothing is drawn.
    pub fn complete_decode(&mut self, ticket: DecodeTicket, image: B::Image) -> Result<bool> {
        if ticket.session != self.session {
            log!(
                self,
                Warn,
                "discarding photo {} of stale session {}",
                ticket.index,
                ticket.session
            );
            return Ok(false);
        }
        let Some(slot) = self.decoded.get_mut(ticket.index) else {
            return Ok(false);
        };
        *slot = Some(image);
        self.render()?;
        Ok(true)
    }

    /// Decodes every pending photo with the backend, then renders once.
    pub fn decode_pending(&mut self) -> Result<RenderStatus> {
        for (photo, slot) in self.photos.iter().zip(self.decoded.iter_mut()) {
            if slot.is_none() {
                *slot = Some(self.backend.decode(photo)?);
            }
        }
        self.render()
    }

    /// Adds a sticker at a random spot away from the edges.
    pub fn add_sticker(&mut self, glyph: impl Into<String>) -> Result<StickerId> {
        self.stickers.push(Sticker::spawn(glyph, &mut self.rng));
        let id = StickerId(self.stickers.len() - 1);
        self.render()?;
        Ok(id)
    }

    pub fn set_background_color(&mut self, color: Color) -> Result<()> {
        self.background = color;
        self.render()?;
        Ok(())
    }

    /// Redraws the composite from scratch.
    pub fn render(&mut self) -> Result<RenderStatus> {
        self.generation += 1;
        let generation = self.generation;
        let (w, h) = self.geometry.canvas_size();
        let cell = self.geometry.cell;

        self.backend.new_canvas(&self.background, w, h)?;
        let mut decoded = 0;
        for (i, img) in self.decoded.iter().enumerate() {
            if let Some(img) = img {
                let (x, y) = self.geometry.cell_origin(i);
                self.backend.draw_image(img, x, y, cell.width, cell.height)?;
                decoded += 1;
            }
        }

        let total = self.decoded.len();
        if decoded < total {
            log!(self, Status, "render {generation}: {decoded}/{total} photos");
            return Ok(RenderStatus::Partial {
                generation,
                decoded,
                total,
            });
        }

        for sticker in self.stickers.iter() {
            let c = sticker.center((w, h));
            self.backend
                .draw_glyph(sticker.glyph(), c.x, c.y, sticker.size())?;
        }
        log!(
            self,
            Status,
            "render {generation}: {total} photos, {} stickers",
            self.stickers.len()
        );
        Ok(RenderStatus::Complete { generation })
    }

    /// Grips the topmost sticker under `pt`.
    pub fn pointer_down(&mut self, pt: Point) -> Option<StickerId> {
        let canvas = self.canvas_size();
        let picked = self.interaction.press(&self.stickers, canvas, pt);
        if let Some(id) = picked {
            self.last_active = Some(id);
            log!(self, Status, "gripped sticker {}", id.index());
        }
        picked
    }

    /// Moves the gripped sticker. Returns `false` when nothing is gripped.
    pub fn pointer_move(&mut self, pt: Point) -> Result<bool> {
        let canvas = self.canvas_size();
        if !self
            .interaction
            .drag(&mut self.stickers, canvas, pt, self.config.drag)
        {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.interaction.release()
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.interaction.release()
    }

    /// Resizes the gripped sticker, or the one gripped last, by one step.
    /// Scrolling up (`delta < 0`) grows it. Returns `false` when there is no
    /// such sticker or `delta` is zero.
    pub fn wheel(&mut self, delta: f64) -> Result<bool> {
        let Some(id) = self.interaction.dragged().or(self.last_active) else {
            return Ok(false);
        };
        let steps = if delta < 0.0 {
            1
        } else if delta > 0.0 {
            -1
        } else {
            return Ok(false);
        };
        let Some(sticker) = self.stickers.get_mut(id.index()) else {
            return Ok(false);
        };
        sticker.grow(steps);
        self.render()?;
        Ok(true)
    }

    /// Dispatches a pointer event. Returns whether it changed anything.
    pub fn handle(&mut self, event: PointerEvent) -> Result<bool> {
        match event {
            PointerEvent::Down(pt) => Ok(self.pointer_down(pt).is_some()),
            PointerEvent::Move(pt) => self.pointer_move(pt),
            PointerEvent::Up => Ok(self.pointer_up()),
            PointerEvent::Leave => Ok(self.pointer_leave()),
            PointerEvent::Wheel(delta) => self.wheel(delta),
        }
    }

    pub fn export(&self) -> Result<Export> {
        self.export_dated(IsoDate::today())
    }

    /// Encodes the current surface, naming it after `date`.
    pub fn export_dated(&self, date: IsoDate) -> Result<Export> {
        let pixels = self.backend.pixels()?;
        let filename = export::filename(&self.config.product, date);
        let title = filename.strip_suffix(".png").unwrap_or(&filename);
        let png = export::encode_png(&pixels, &self.config.product, title)?;
        log!(self, Done, "exported {filename}");
        Ok(Export { filename, png })
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.get(id.index())
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        self.geometry.canvas_size()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The gripped sticker, or else the one gripped most recently.
    pub fn active_sticker(&self) -> Option<StickerId> {
        self.interaction.dragged().or(self.last_active)
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::image::Pixels;
    use crate::sticker::{DEFAULT_SIZE, MIN_SIZE, RESIZE_STEP, SPAWN_RANGE};
    use std::sync::mpsc;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Canvas(Color, i32, i32),
        Image(u8, i32, i32),
        Glyph(String, f64, f64, f64),
        Clear,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        ops: Vec<Op>,
        size: (i32, i32),
        broken: bool,
    }

    impl Recorder {
        fn last_pass(&self) -> &[Op] {
            let start = self
                .ops
                .iter()
                .rposition(|op| matches!(op, Op::Canvas(..)))
                .unwrap_or(0);
            &self.ops[start..]
        }
    }

    impl Backend for Recorder {
        type Image = u8;

        fn decode(&self, data: &[u8]) -> Result<u8> {
            data.first()
                .copied()
                .ok_or_else(|| Error::VipsError("empty photo".into()))
        }

        fn new_canvas(&mut self, bg: &Color, width: i32, height: i32) -> Result<()> {
            if self.broken {
                return Err(Error::VipsError("out of memory".into()));
            }
            self.ops.push(Op::Canvas(*bg, width, height));
            self.size = (width, height);
            Ok(())
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
            self.size = (0, 0);
        }

        fn draw_image(&mut self, img: &u8, x: i32, y: i32, _w: i32, _h: i32) -> Result<()> {
            self.ops.push(Op::Image(*img, x, y));
            Ok(())
        }

        fn draw_glyph(&mut self, glyph: &str, cx: f64, cy: f64, size: f64) -> Result<()> {
            self.ops.push(Op::Glyph(glyph.to_string(), cx, cy, size));
            Ok(())
        }

        fn pixels(&self) -> Result<Pixels> {
            let (w, h) = (self.size.0 as u32, self.size.1 as u32);
            Ok(Pixels {
                width: w,
                height: h,
                rgba: vec![255; (w * h * 4) as usize],
            })
        }
    }

    fn photos(n: u8) -> Vec<Photo> {
        (0..n).map(|i| Photo::from(vec![i])).collect()
    }

    fn scene() -> Scene<Recorder> {
        Scene::new(Recorder::default(), SceneConfig::default()).with_seed(42)
    }

    fn ready_scene() -> Scene<Recorder> {
        let mut scene = scene();
        scene.init(photos(4), Layout::Grid2x2).unwrap();
        scene.decode_pending().unwrap();
        scene
    }

    fn grab(scene: &mut Scene<Recorder>, id: StickerId) -> Point {
        let center = scene.sticker(id).unwrap().center(scene.canvas_size());
        assert_eq!(scene.pointer_down(center), Some(id));
        center
    }

    #[test]
    fn add_sticker_appends_one_default_sized_sticker() {
        let mut scene = ready_scene();
        for i in 0..50 {
            assert_eq!(scene.stickers().len(), i);
            let id = scene.add_sticker("⭐").unwrap();
            assert_eq!(scene.stickers().len(), i + 1);
            assert_eq!(id.index(), i);

            let sticker = scene.sticker(id).unwrap();
            let (x, y) = sticker.position();
            assert!(SPAWN_RANGE.contains(&x) && SPAWN_RANGE.contains(&y));
            assert_eq!(sticker.size(), DEFAULT_SIZE);
        }
    }

    #[test]
    fn wheel_never_goes_below_the_floor() {
        let mut scene = ready_scene();
        let id = scene.add_sticker("⭐").unwrap();
        grab(&mut scene, id);
        assert!(scene.pointer_up());

        for _ in 0..100 {
            assert!(scene.wheel(1.0).unwrap());
        }
        assert_eq!(scene.sticker(id).unwrap().size(), MIN_SIZE);

        assert!(scene.wheel(-120.0).unwrap());
        assert_eq!(scene.sticker(id).unwrap().size(), MIN_SIZE + RESIZE_STEP);
        assert!(!scene.wheel(0.0).unwrap());
    }

    #[test]
    fn wheel_without_active_sticker_is_a_no_op() {
        let mut scene = ready_scene();
        let id = scene.add_sticker("⭐").unwrap();
        let generation = scene.generation();
        assert!(!scene.wheel(-1.0).unwrap());
        assert_eq!(scene.sticker(id).unwrap().size(), DEFAULT_SIZE);
        assert_eq!(scene.generation(), generation);
    }

    #[test]
    fn wheel_prefers_the_gripped_sticker() {
        let mut scene = ready_scene();
        let first = scene.add_sticker("⭐").unwrap();
        let second = scene.add_sticker("🌸").unwrap();
        scene.stickers[0].set_position(0.2, 0.2);
        scene.stickers[1].set_position(0.8, 0.8);

        grab(&mut scene, first);
        scene.pointer_up();
        grab(&mut scene, second);
        assert!(scene.wheel(-1.0).unwrap());
        assert_eq!(scene.sticker(second).unwrap().size(), DEFAULT_SIZE + RESIZE_STEP);
        assert_eq!(scene.sticker(first).unwrap().size(), DEFAULT_SIZE);
        assert_eq!(scene.interaction().dragged(), Some(second));
    }

    #[test]
    fn later_sticker_wins_when_overlapping() {
        let mut scene = ready_scene();
        scene.add_sticker("❤️").unwrap();
        let top = scene.add_sticker("⭐").unwrap();
        scene.stickers[0].set_position(0.4, 0.6);
        scene.stickers[1].set_position(0.4, 0.6);

        let at = scene.stickers[0].center(scene.canvas_size());
        assert_eq!(scene.pointer_down(at), Some(top));
        assert_eq!(scene.active_sticker(), Some(top));
    }

    #[test]
    fn drag_from_center_to_origin() {
        for drag in [DragMode::PreserveGrip, DragMode::Snap] {
            let config = SceneConfig {
                drag,
                ..Default::default()
            };
            let mut scene = Scene::new(Recorder::default(), config).with_seed(3);
            scene.init(photos(4), Layout::Default).unwrap();
            scene.decode_pending().unwrap();
            let id = scene.add_sticker("★").unwrap();

            grab(&mut scene, id);
            assert!(scene.pointer_move(Point::new(0.0, 0.0)).unwrap());
            assert_eq!(scene.sticker(id).unwrap().position(), (0.0, 0.0));
            assert!(scene.pointer_up());
            assert!(!scene.pointer_move(Point::new(50.0, 50.0)).unwrap());
            assert_eq!(scene.sticker(id).unwrap().position(), (0.0, 0.0));
        }
    }

    #[test]
    fn pointer_leave_ends_the_drag() {
        let mut scene = ready_scene();
        let id = scene.add_sticker("⭐").unwrap();
        grab(&mut scene, id);
        assert!(scene.handle(PointerEvent::Leave).unwrap());
        assert_eq!(scene.interaction(), Interaction::Idle);
        assert!(!scene.handle(PointerEvent::Move(Point::new(1.0, 1.0))).unwrap());
        // still the most recent one for the wheel
        assert_eq!(scene.active_sticker(), Some(id));
    }

    #[test]
    fn reset_then_init_leaves_nothing_behind() {
        let mut scene = ready_scene();
        let id = scene.add_sticker("⭐").unwrap();
        scene.add_sticker("🌙").unwrap();
        scene.set_background_color(Color::from_rgb8(0xff, 0x6b, 0x6b)).unwrap();
        grab(&mut scene, id);

        scene.reset();
        assert!(scene.stickers().is_empty());
        assert!(scene.photos().is_empty());
        assert_eq!(scene.backend().ops.last(), Some(&Op::Clear));

        let tickets = scene.init(photos(6), Layout::Grid2x3).unwrap();
        assert_eq!(tickets.len(), 6);
        assert!(scene.stickers().is_empty());
        assert_eq!(scene.background(), Color::WHITE);
        assert_eq!(scene.layout(), Layout::Grid2x3);
        assert_eq!(scene.photos().len(), 6);
        assert_eq!(scene.interaction(), Interaction::Idle);
        assert_eq!(scene.active_sticker(), None);
        assert!(!scene.wheel(-1.0).unwrap());
        assert!(!scene.pointer_move(Point::new(0.0, 0.0)).unwrap());
    }

    #[test]
    fn stale_decode_after_reset_is_discarded() {
        let (tx, rx) = mpsc::channel();
        let mut scene = scene().with_log(tx);
        let old = scene.init(photos(4), Layout::Grid2x2).unwrap();
        scene.reset();
        let new = scene.init(photos(4), Layout::Grid1x4).unwrap();
        assert_eq!(old[0].index(), new[0].index());
        assert_ne!(old[0], new[0]);
        assert_eq!(scene.photo(old[0]), None);
        assert!(scene.photo(new[0]).is_some());

        let ops = scene.backend().ops.len();
        let generation = scene.generation();
        assert!(!scene.complete_decode(old[0], 9).unwrap());
        assert_eq!(scene.backend().ops.len(), ops);
        assert_eq!(scene.generation(), generation);
        assert_eq!(scene.pending().len(), 4);
        assert!(rx
            .try_iter()
            .any(|e| matches!(e, LogEvent::Warn(msg) if msg.contains("stale"))));
    }

    #[test]
    fn stickers_wait_for_every_photo() {
        let mut scene = scene();
        let tickets = scene.init(photos(4), Layout::Grid2x2).unwrap();
        scene.add_sticker("⭐").unwrap();
        let pass = scene.backend().last_pass();
        assert!(pass.iter().all(|op| !matches!(op, Op::Glyph(..))));

        let mut reversed = tickets.clone();
        reversed.reverse();
        let (last, rest) = reversed.split_last().unwrap();
        for ticket in rest {
            assert!(scene.complete_decode(*ticket, ticket.index() as u8).unwrap());
            let pass = scene.backend().last_pass();
            assert!(pass.iter().all(|op| !matches!(op, Op::Glyph(..))));
        }
        assert!(matches!(
            scene.render().unwrap(),
            RenderStatus::Partial {
                decoded: 3,
                total: 4,
                ..
            }
        ));

        assert!(scene.complete_decode(*last, last.index() as u8).unwrap());
        let pass = scene.backend().last_pass();
        assert_eq!(pass.len(), 1 + 4 + 1);
        assert!(matches!(pass[0], Op::Canvas(..)));
        assert!(pass[1..5].iter().all(|op| matches!(op, Op::Image(..))));
        assert!(matches!(&pass[5], Op::Glyph(g, ..) if g == "⭐"));
        assert!(scene.pending().is_empty());
    }

    #[test]
    fn stickers_are_drawn_at_their_center_and_size() {
        let mut scene = ready_scene();
        let id = scene.add_sticker("⭐").unwrap();
        scene.stickers[0].set_position(0.5, 0.5);
        let (w, h) = scene.canvas_size();
        assert_eq!((w, h), (660, 860));

        let center = grab(&mut scene, id);
        let to = center + (-100.0, 43.0);
        assert!(scene.pointer_move(to).unwrap());
        let (x, y) = scene.sticker(id).unwrap().position();
        let Some(Op::Glyph(_, cx, cy, size)) = scene.backend().ops.last().cloned() else {
            panic!("no sticker drawn");
        };
        assert!((cx - x * w as f64).abs() < 1e-9);
        assert!((cy - y * h as f64).abs() < 1e-9);
        assert!((cx - to.x).abs() < 1e-9 && (cy - to.y).abs() < 1e-9);
        assert_eq!(size, DEFAULT_SIZE);

        assert!(scene.wheel(-1.0).unwrap());
        let Some(Op::Glyph(_, _, _, size)) = scene.backend().ops.last().cloned() else {
            panic!("no sticker drawn");
        };
        assert_eq!(size, DEFAULT_SIZE + RESIZE_STEP);
    }

    #[test]
    fn failed_first_render_keeps_the_new_session() {
        let mut scene = ready_scene();
        scene.add_sticker("⭐").unwrap();
        let session = scene.session();
        scene.backend.broken = true;

        assert!(scene.init(photos(6), Layout::Grid2x3).is_err());
        assert_eq!(scene.session(), session + 1);
        assert!(scene.stickers().is_empty());
        let tickets = scene.pending();
        assert_eq!(tickets.len(), 6);
        assert!(tickets.iter().all(|t| scene.photo(*t).is_some()));
    }

    #[test]
    fn photos_land_on_their_cells() {
        let mut scene = scene();
        scene.init(photos(6), Layout::Grid2x3).unwrap();
        let status = scene.decode_pending().unwrap();
        assert!(matches!(status, RenderStatus::Complete { .. }));

        let pass = scene.backend().last_pass();
        assert_eq!(pass[0], Op::Canvas(Color::WHITE, 660, 1280));
        assert_eq!(pass[1], Op::Image(0, 20, 20));
        assert_eq!(pass[2], Op::Image(1, 340, 20));
        assert_eq!(pass[3], Op::Image(2, 20, 440));
        assert_eq!(pass[6], Op::Image(5, 340, 860));
    }

    #[test]
    fn background_changes_rerender() {
        let mut scene = ready_scene();
        let before = scene.generation();
        let teal = Color::from_rgb8(0x4e, 0xcd, 0xc4);
        scene.set_background_color(teal).unwrap();
        assert_eq!(scene.generation(), before + 1);
        assert!(matches!(scene.backend().last_pass()[0], Op::Canvas(c, ..) if c == teal));
    }

    #[test]
    fn extra_photos_are_dropped() {
        let mut scene = scene();
        let tickets = scene.init(photos(5), Layout::Grid1x4).unwrap();
        assert_eq!(tickets.len(), 4);
        assert_eq!(scene.photos().len(), 4);
    }

    #[test]
    fn export_names_and_encodes_the_surface() {
        let config = SceneConfig {
            cell: CellSize {
                width: 8,
                height: 6,
            },
            padding: 2,
            ..Default::default()
        };
        let mut scene = Scene::new(Recorder::default(), config);
        scene.init(photos(4), Layout::Grid2x2).unwrap();
        scene.decode_pending().unwrap();

        let date = IsoDate {
            year: 2025,
            month: 7,
            day: 1,
        };
        let export = scene.export_dated(date).unwrap();
        assert_eq!(export.filename, "glass-photobooth-2025-07-01.png");
        assert_eq!(&export.png[..4], &[0x89, b'P', b'N', b'G']);

        let reader = png::Decoder::new(export.png.as_slice()).read_info().unwrap();
        let title = reader
            .info()
            .uncompressed_latin1_text
            .iter()
            .find(|t| t.keyword == "Title")
            .map(|t| t.text.clone());
        assert_eq!(title.as_deref(), Some("glass-photobooth-2025-07-01"));
    }
}
