// Bindings for the Chessground board widget. The page must load Chessground so that the global
// `Chessground(element, config)` function is available.

use fairy_board::board_view::{BoardConfig, BoardPosition, BoardView, MovableColor};
use fairy_board::coord::Coord;
use fairy_board::event::LegalDests;
use fairy_board::force::Force;
use fairy_board::shape::DrawShape;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::web_error_handling::JsResult;


#[wasm_bindgen]
extern "C" {
    pub type ChessgroundApi;

    #[wasm_bindgen(js_name = Chessground)]
    fn chessground(element: &web_sys::Element, config: &JsValue) -> ChessgroundApi;

    #[wasm_bindgen(method)]
    fn set(this: &ChessgroundApi, config: &JsValue);

    #[wasm_bindgen(method, js_name = "move")]
    fn move_piece(this: &ChessgroundApi, orig: &str, dest: &str);

    #[wasm_bindgen(method, js_name = setShapes)]
    fn set_shapes(this: &ChessgroundApi, shapes: &JsValue);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitialConfig<'a> {
    fen: &'a str,
    coordinates: bool,
    auto_castle: bool,
    highlight: HighlightConfig,
    movable: MovableConfig,
    premovable: PremovableConfig,
    draggable: DraggableConfig,
    drawable: DrawableConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HighlightConfig {
    last_move: bool,
    check: bool,
}

#[derive(Serialize)]
struct MovableConfig {
    color: MovableColor,
    free: bool,
}

#[derive(Serialize)]
struct PremovableConfig {
    enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraggableConfig {
    show_ghost: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DrawableConfig {
    default_snap_to_valid_move: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionConfig<'a> {
    orientation: Force,
    fen: &'a str,
    check: bool,
    turn_color: Force,
    movable: DestsConfig<'a>,
}

#[derive(Serialize)]
struct DestsConfig<'a> {
    // Serialized as an ES `Map`, which is what Chessground expects.
    dests: &'a LegalDests,
}

pub struct ChessgroundView {
    api: ChessgroundApi,
}

impl ChessgroundView {
    pub fn new(element: &web_sys::Element) -> Self {
        ChessgroundView { api: chessground(element, &js_sys::Object::new()) }
    }

    // Installs the user interaction callbacks. The closures must outlive the widget or be
    // uninstalled with `remove_hooks`.
    pub fn install_hooks(
        &self, after_move: &Closure<dyn FnMut(String, String)>,
        on_draw: &Closure<dyn FnMut(JsValue)>,
    ) -> JsResult<()> {
        self.set_hooks(after_move.as_ref(), on_draw.as_ref())
    }

    pub fn remove_hooks(&self) -> JsResult<()> {
        self.set_hooks(&JsValue::UNDEFINED, &JsValue::UNDEFINED)
    }

    fn set_hooks(&self, after_move: &JsValue, on_draw: &JsValue) -> JsResult<()> {
        let events = js_sys::Object::new();
        js_sys::Reflect::set(&events, &"after".into(), after_move)?;
        let movable = js_sys::Object::new();
        js_sys::Reflect::set(&movable, &"events".into(), &events)?;
        let drawable = js_sys::Object::new();
        js_sys::Reflect::set(&drawable, &"onChange".into(), on_draw)?;
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"movable".into(), &movable)?;
        js_sys::Reflect::set(&config, &"drawable".into(), &drawable)?;
        self.api.set(&config);
        Ok(())
    }

    fn set_config(&self, config: &impl Serialize) {
        match serde_wasm_bindgen::to_value(config) {
            Ok(value) => self.api.set(&value),
            Err(err) => log::error!("Cannot build board config: {}", err),
        }
    }
}

impl BoardView for ChessgroundView {
    fn configure(&mut self, config: &BoardConfig) {
        self.set_config(&InitialConfig {
            fen: &config.fen,
            coordinates: config.coordinates,
            auto_castle: config.auto_castle,
            highlight: HighlightConfig {
                last_move: config.highlight_last_move,
                check: config.highlight_check,
            },
            movable: MovableConfig {
                color: config.movable_color,
                free: config.free_moves,
            },
            premovable: PremovableConfig { enabled: config.premoves },
            draggable: DraggableConfig { show_ghost: config.show_ghost },
            drawable: DrawableConfig {
                default_snap_to_valid_move: config.snap_drawing_to_valid_move,
            },
        });
    }

    fn apply_position(&mut self, position: &BoardPosition) {
        self.set_config(&PositionConfig {
            orientation: position.orientation,
            fen: &position.fen,
            check: position.check,
            turn_color: position.turn_color,
            movable: DestsConfig { dests: &position.dests },
        });
    }

    fn clear_last_move_highlight(&mut self) {
        let config = js_sys::Object::new();
        match js_sys::Reflect::set(&config, &"lastMove".into(), &js_sys::Array::new()) {
            Ok(_) => self.api.set(&config),
            Err(err) => log::error!("Cannot clear last move: {:?}", err),
        }
    }

    fn animate_move(&mut self, from: Coord, to: Coord) {
        self.api.move_piece(&from.to_algebraic(), &to.to_algebraic());
    }

    fn set_drawn_shapes(&mut self, shapes: &[DrawShape]) {
        // Shapes carry flattened extra fields, so they must become plain objects rather than maps.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match shapes.serialize(&serializer) {
            Ok(value) => self.api.set_shapes(&value),
            Err(err) => log::error!("Cannot draw shapes: {}", err),
        }
    }
}

pub fn parse_drawn_shapes(value: JsValue) -> Result<Vec<DrawShape>, serde_wasm_bindgen::Error> {
    serde_wasm_bindgen::from_value(value)
}
