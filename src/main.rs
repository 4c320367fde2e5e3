//! Sky High entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
        HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use sky_high::assets::{AssetKey, AssetSource};
    use sky_high::audio::{AudioManager, cue_for};
    use sky_high::platform::{KeyValueStore, LocalStorage, MemoryStore};
    use sky_high::render::{SpriteInstance, build_draw_list};
    use sky_high::sim::{GamePhase, GameScene, ShipId, StartConfig, TickInput};
    use sky_high::{HighScores, Settings, Viewport, format_score};

    /// Longest frame the simulation is allowed to see
    const MAX_FRAME_MS: f32 = 100.0;
    const DEFAULT_NAME: &str = "Pilot";

    /// Decoded textures, indexed by asset slot
    struct Images {
        images: Vec<HtmlImageElement>,
    }

    impl Images {
        async fn load() -> Result<Self, JsValue> {
            let mut images = Vec::with_capacity(AssetKey::ALL.len());
            for key in AssetKey::ALL {
                let img = HtmlImageElement::new()?;
                img.set_src(&key.path());
                if let Err(e) = JsFuture::from(img.decode()).await {
                    log::error!("Failed to load {}: {:?}", key.path(), e);
                    return Err(e);
                }
                images.push(img);
            }
            Ok(Self { images })
        }

        fn get(&self, key: AssetKey) -> Option<&HtmlImageElement> {
            self.images.get(key.index() as usize)
        }
    }

    impl AssetSource for Images {
        fn dimensions(&self, key: AssetKey) -> Option<(u32, u32)> {
            self.get(key)
                .filter(|img| img.complete())
                .map(|img| (img.natural_width(), img.natural_height()))
        }
    }

    /// Game instance holding all host state
    struct Game {
        scene: GameScene,
        ship: ShipId,
        images: Images,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        high_scores: HighScores,
        /// Filled by the scene's game-over callback
        final_score: Rc<Cell<Option<u64>>>,
        input: TickInput,
        pointer_down: bool,
        audio_started: bool,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn start_scene(
            ship: ShipId,
            viewport: Viewport,
            images: &Images,
            final_score: &Rc<Cell<Option<u64>>>,
        ) -> Result<GameScene, JsValue> {
            let seed = js_sys::Date::now() as u64;
            let sink = final_score.clone();
            let config = StartConfig::new(ship, move |score| sink.set(Some(score))).with_seed(seed);
            let mut scene =
                GameScene::init(config, viewport).map_err(|e| JsValue::from_str(&e.to_string()))?;
            scene
                .load_assets(images)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(scene)
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Start a fresh session with the same ship
        fn restart(&mut self) {
            match Self::start_scene(self.ship, self.viewport(), &self.images, &self.final_score) {
                Ok(scene) => {
                    self.scene = scene;
                    self.input = TickInput::default();
                    self.final_score.set(None);
                    self.audio.start_loops();
                    if let Some(document) = document() {
                        set_hidden(&document, "game-over", true);
                    }
                    log::info!("Game restarted");
                }
                Err(e) => log::error!("Restart failed: {:?}", e),
            }
        }

        /// First gesture unlocks audio playback
        fn on_gesture(&mut self) {
            if !self.audio_started {
                self.audio_started = true;
                self.audio.start_loops();
            }
        }

        fn update(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                ((time - self.last_time) as f32).min(MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.fit_canvas();
            self.scene.tick(&self.input, delta);
            self.input.toggle_pause = false;

            for event in self.scene.drain_events() {
                if let Some(cue) = cue_for(&event) {
                    self.audio.handle(cue);
                }
            }

            if let Some(score) = self.final_score.take() {
                self.submit_score(score);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }
        }

        /// Keep the backing store at device resolution
        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if width == 0 || height == 0 {
                return;
            }
            if width != self.canvas.width() || height != self.canvas.height() {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                self.scene.resize(self.viewport());
            }
        }

        fn submit_score(&mut self, score: u64) {
            let Some(document) = document() else {
                return;
            };
            let name = document
                .get_element_by_id("player-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value().trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_NAME.to_string());

            let rank = self.high_scores.add_score(&name, score, js_sys::Date::now());
            if rank.is_some() {
                if let Err(e) = self.high_scores.save(self.store.as_mut()) {
                    log::error!("Could not save high scores: {}", e);
                }
            }

            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&format_score(score)));
            }
            if let Some(el) = document.get_element_by_id("final-rank") {
                let text = rank.map(|r| format!("#{}", r)).unwrap_or_default();
                el.set_text_content(Some(&text));
            }
            set_hidden(&document, "game-over", false);
        }

        fn render(&self) {
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            self.ctx.clear_rect(0.0, 0.0, width, height);

            for sprite in &build_draw_list(&self.scene, &self.settings).sprites {
                self.draw_sprite(sprite);
            }
            self.draw_hud();
        }

        fn draw_sprite(&self, sprite: &SpriteInstance) {
            let Some(img) = sprite.key().and_then(|key| self.images.get(key)) else {
                return;
            };
            let top_left = sprite.top_left();
            let [w, h] = sprite.size;

            if sprite.is_tiled() {
                let [tile_w, tile_h] = sprite.tile_size;
                if tile_w <= 0.0 {
                    return;
                }
                // Tiles sit on the bottom edge of the strip
                let y = (top_left.y + h - tile_h) as f64;
                let mut x = top_left.x - sprite.uv_offset[0];
                while x < top_left.x + w {
                    self.ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            x as f64,
                            y,
                            tile_w as f64,
                            tile_h as f64,
                        )
                        .ok();
                    x += tile_w;
                }
            } else {
                self.ctx.set_global_alpha(sprite.alpha as f64);
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        top_left.x as f64,
                        top_left.y as f64,
                        w as f64,
                        h as f64,
                    )
                    .ok();
                self.ctx.set_global_alpha(1.0);
            }
        }

        fn draw_hud(&self) {
            let vp = self.scene.viewport();
            let font_px = vp.responsive(48.0).round().max(12.0);
            let margin = vp.responsive(24.0) as f64;

            self.ctx.set_font(&format!("bold {}px sans-serif", font_px));
            self.ctx.set_fill_style_str("#ffffff");
            self.ctx
                .fill_text(
                    &format_score(self.scene.score()),
                    margin,
                    margin + font_px as f64,
                )
                .ok();

            if self.settings.show_fps {
                self.ctx.set_font(&format!("{}px monospace", (font_px / 2.0).round()));
                self.ctx
                    .fill_text(
                        &format!("{} fps", self.fps),
                        margin,
                        margin + font_px as f64 * 1.8,
                    )
                    .ok();
            }

            if self.scene.phase() == GamePhase::Paused {
                self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
                self.ctx.fill_rect(0.0, 0.0, vp.width as f64, vp.height as f64);
                self.ctx.set_fill_style_str("#ffffff");
                self.ctx.set_font(&format!("bold {}px sans-serif", font_px * 1.5));
                self.ctx.set_text_align("center");
                self.ctx
                    .fill_text("PAUSED", vp.width as f64 / 2.0, vp.height as f64 / 2.0)
                    .ok();
                self.ctx.set_text_align("start");
            }
        }

        /// Canvas-space position from client coordinates
        fn canvas_point(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = self.canvas.width() as f64 / rect.width().max(1.0);
            let sy = self.canvas.height() as f64 / rect.height().max(1.0);
            Vec2::new(
                ((client_x - rect.left()) * sx) as f32,
                ((client_y - rect.top()) * sy) as f32,
            )
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Ship chosen on the selection screen, passed as `?ship=<id>`
    fn selected_ship() -> ShipId {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|query| {
                query
                    .trim_start_matches('?')
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("ship="))
                    .and_then(ShipId::parse)
            })
            .unwrap_or_default()
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({}), scores kept in memory", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky High starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr).max(1.0) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr).max(1.0) as u32);
        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);

        let images = match Images::load().await {
            Ok(images) => images,
            Err(e) => {
                if let Some(el) = document.get_element_by_id("loading") {
                    el.set_text_content(Some("Could not load game assets"));
                }
                return Err(e);
            }
        };
        set_hidden(&document, "loading", true);

        let store = open_store();
        let settings = Settings::load(store.as_ref());
        let high_scores = HighScores::load(store.as_ref());

        let ship = selected_ship();
        let final_score = Rc::new(Cell::new(None));
        let scene = Game::start_scene(ship, viewport, &images, &final_score)?;

        let game = Rc::new(RefCell::new(Game {
            scene,
            ship,
            images,
            canvas: canvas.clone(),
            ctx,
            audio: AudioManager::new(&settings),
            settings,
            store,
            high_scores,
            final_score,
            input: TickInput::default(),
            pointer_down: false,
            audio_started: false,
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());
        set_hidden(&document, "hud", false);

        request_animation_frame(game);

        log::info!("Sky High running as {}", ship.as_str());
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - start steering
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.on_gesture();
                g.pointer_down = true;
                let p = g.canvas_point(event.client_x() as f64, event.client_y() as f64);
                g.input.pointer = Some(p);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - follow while held
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.pointer_down {
                    let p = g.canvas_point(event.client_x() as f64, event.client_y() as f64);
                    g.input.pointer = Some(p);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave - release
        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.pointer_down = false;
                g.input.pointer = None;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.on_gesture();
                if let Some(touch) = event.touches().get(0) {
                    let p = g.canvas_point(touch.client_x() as f64, touch.client_y() as f64);
                    g.input.pointer = Some(p);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    game.borrow_mut().input.pointer = None;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.on_gesture();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => g.input.up = true,
                    "ArrowDown" => g.input.down = true,
                    "Escape" | "p" | "P" => {
                        if !event.repeat() {
                            g.input.toggle_pause = true;
                        }
                    }
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.up = false,
                    "ArrowDown" => g.input.down = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.toggle_pause = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.auto_pause && g.scene.phase() == GamePhase::Playing {
                        g.input.toggle_pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.settings.auto_pause && g.scene.phase() == GamePhase::Playing {
                    g.input.toggle_pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back - unmute, stay paused until the player resumes
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Sky High failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky High (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the web build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ship = args
        .next()
        .and_then(|s| sky_high::sim::ShipId::parse(&s))
        .unwrap_or_default();

    match demo::run(seed, ship) {
        Ok(score) => println!("Final score: {}", sky_high::format_score(score)),
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::Cell;
    use std::rc::Rc;

    use sky_high::assets::StaticAssets;
    use sky_high::platform::MemoryStore;
    use sky_high::sim::{GameScene, ShipId, StartConfig, TickInput};
    use sky_high::{GameError, HighScores, Tuning, Viewport};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Optional balance overrides from `SKY_HIGH_TUNING`
    fn tuning() -> Result<Tuning, GameError> {
        tuning_from(std::env::var("SKY_HIGH_TUNING").ok().as_deref())
    }

    /// Inline JSON object, or a path to a JSON file
    fn tuning_from(value: Option<&str>) -> Result<Tuning, GameError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Tuning::default());
        };
        if value.starts_with('{') {
            return Tuning::from_json(value);
        }
        let json = std::fs::read_to_string(value)
            .map_err(|e| GameError::Tuning(format!("{value}: {e}")))?;
        Tuning::from_json(&json)
    }

    /// Play one seeded session on autopilot and record the result
    pub fn run(seed: u64, ship: ShipId) -> Result<u64, GameError> {
        let reported = Rc::new(Cell::new(None));
        let sink = reported.clone();
        let config = StartConfig::new(ship, move |score| sink.set(Some(score)))
            .with_seed(seed)
            .with_tuning(tuning()?);

        let mut scene = GameScene::init(config, Viewport::new(1920.0, 1080.0))?;
        scene.load_assets(&StaticAssets::standard())?;

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut frames = 0;
        while reported.get().is_none() && frames < MAX_FRAMES {
            scene.tick(&input, FRAME_MS);
            frames += 1;
        }

        let score = reported.get().unwrap_or_else(|| scene.score());
        log::info!(
            "Session over after {:.1}s at speed x{:.1}",
            frames as f32 * FRAME_MS / 1000.0,
            scene.speed_multiplier()
        );

        let mut store = MemoryStore::new();
        let mut table = HighScores::load(&store);
        table.add_score(ship.as_str(), score, seed as f64);
        table.save(&mut store)?;

        println!("High scores:");
        for (i, entry) in HighScores::load(&store).entries.iter().enumerate() {
            println!(
                "{:>2}. {:<12} {}",
                i + 1,
                entry.name,
                sky_high::format_score(entry.score)
            );
        }
        Ok(score)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_tuning_from_inline_json() {
            let tuning = tuning_from(Some(r#"{ "speed_increment": 0.2 }"#)).unwrap();
            assert_eq!(tuning.speed_increment, 0.2);
        }

        #[test]
        fn test_tuning_defaults_when_unset() {
            assert_eq!(tuning_from(None).unwrap(), Tuning::default());
            assert_eq!(tuning_from(Some("  ")).unwrap(), Tuning::default());
        }

        #[test]
        fn test_tuning_from_file() {
            let path = std::env::temp_dir()
                .join(format!("sky_high_tuning_{}.json", std::process::id()));
            std::fs::write(&path, r#"{ "star_points": 25 }"#).unwrap();
            let tuning = tuning_from(path.to_str()).unwrap();
            std::fs::remove_file(&path).ok();
            assert_eq!(tuning.star_points, 25);
        }

        #[test]
        fn test_tuning_missing_file_is_error() {
            let err = tuning_from(Some("/nonexistent/sky_high.json")).unwrap_err();
            assert!(matches!(err, GameError::Tuning(_)));
        }

        #[test]
        fn test_autopilot_session_reports_score() {
            let score = run(3, ShipId::Klas).unwrap();
            assert_eq!(score % 10, 0);
        }
    }
}
