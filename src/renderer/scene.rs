//! Scene building: game state to a flat list of draw commands
//!
//! Pure and platform independent, so the draw order and overlay text can be
//! checked without a canvas. World-space entities are shifted by
//! `scroll_pos`; the player and overlay are already in screen space.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, FLOOR_Y};
use crate::settings::Settings;
use crate::sim::{Emitter, Facing, GamePhase, GameState, Player, Sampler};

pub type Rgba = [u8; 4];

/// Palette for game elements
pub mod colors {
    use super::Rgba;

    pub const SKY: Rgba = [100, 155, 255, 255];
    pub const GROUND: Rgba = [0, 155, 0, 255];
    pub const CLOUD: Rgba = [255, 255, 255, 255];
    pub const MOUNTAIN: Rgba = [147, 112, 219, 255];
    pub const MOUNTAIN_SHADE: Rgba = [106, 90, 205, 255];
    pub const MOUNTAIN_PEAK: Rgba = [255, 255, 255, 255];
    pub const TRUNK: Rgba = [120, 100, 40, 255];
    pub const BRANCH: Rgba = [0, 155, 0, 255];
    pub const CANYON: Rgba = [75, 75, 75, 255];
    pub const LOG: Rgba = [139, 69, 19, 255];
    pub const ROCK: Rgba = [100, 100, 100, 255];
    pub const TENT: Rgba = [255, 165, 0, 255];
    pub const TENT_SIDE: Rgba = [255, 140, 0, 255];
    pub const TENT_DOOR: Rgba = [0, 0, 0, 255];
    pub const CUP_BODY: Rgba = [139, 0, 0, 255];
    pub const CUP_RIM: Rgba = [255, 255, 255, 255];
    pub const COFFEE: Rgba = [0, 0, 0, 255];
    pub const TOUQUE: Rgba = [25, 25, 112, 255];
    pub const BACKPACK: Rgba = [85, 107, 47, 255];
    pub const BODY: Rgba = [70, 130, 180, 255];
    pub const STRAP: Rgba = [47, 79, 79, 255];
    pub const HEAD: Rgba = [200, 150, 150, 255];
    pub const SHOE: Rgba = [0, 0, 0, 255];
    pub const TEXT: Rgba = [255, 255, 0, 255];
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Rgba,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        fill: Rgba,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
    },
}

fn rect(x: f32, y: f32, w: f32, h: f32, fill: Rgba) -> DrawCmd {
    DrawCmd::Rect { x, y, w, h, fill }
}

fn circle(cx: f32, cy: f32, diameter: f32, fill: Rgba) -> DrawCmd {
    DrawCmd::Ellipse {
        center: Vec2::new(cx, cy),
        radii: Vec2::splat(diameter / 2.0),
        fill,
    }
}

fn poly(points: &[(f32, f32)], fill: Rgba) -> DrawCmd {
    DrawCmd::Polygon {
        points: points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        fill,
    }
}

/// Build the full frame.
///
/// `fx` feeds the particle color sampling; it is the renderer's own stream and
/// never touches simulation state.
pub fn build_scene(state: &GameState, settings: &Settings, fx: &mut Sampler) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(256);

    cmds.push(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, colors::SKY));
    cmds.push(rect(
        0.0,
        FLOOR_Y,
        CANVAS_WIDTH,
        CANVAS_HEIGHT - FLOOR_Y,
        colors::GROUND,
    ));

    let mut world = Vec::with_capacity(256);
    world_scene(state, settings, fx, &mut world);
    let dx = state.scroll_pos;
    cmds.extend(world.into_iter().map(|c| translate(c, dx)));

    player_shapes(&state.player, &mut cmds);
    overlay(state, &mut cmds);
    prompts(state, &mut cmds);

    cmds
}

fn translate(cmd: DrawCmd, dx: f32) -> DrawCmd {
    match cmd {
        DrawCmd::Rect { x, y, w, h, fill } => DrawCmd::Rect {
            x: x + dx,
            y,
            w,
            h,
            fill,
        },
        DrawCmd::Ellipse {
            center,
            radii,
            fill,
        } => DrawCmd::Ellipse {
            center: center + Vec2::new(dx, 0.0),
            radii,
            fill,
        },
        DrawCmd::Polygon { points, fill } => DrawCmd::Polygon {
            points: points.into_iter().map(|p| p + Vec2::new(dx, 0.0)).collect(),
            fill,
        },
        text @ DrawCmd::Text { .. } => text,
    }
}

/// Scenery in level coordinates, back to front
fn world_scene(state: &GameState, settings: &Settings, fx: &mut Sampler, out: &mut Vec<DrawCmd>) {
    let level = &state.level;

    for c in &level.clouds {
        let side = c.size * 0.75;
        out.push(circle(c.x - c.size * 0.5, c.y, side, colors::CLOUD));
        out.push(circle(c.x + c.size * 0.5, c.y, side, colors::CLOUD));
        out.push(circle(c.x, c.y, c.size, colors::CLOUD));
    }

    for m in &level.mountains {
        let (x, y, s) = (m.x, m.y, m.size);
        let base = y + 0.663 * s;
        out.push(poly(
            &[(x - 0.429 * s, base), (x, y), (x + 0.571 * s, base)],
            colors::MOUNTAIN,
        ));
        out.push(poly(
            &[
                (x + 0.134 * s, y + 0.157 * s),
                (x - 0.111 * s, base),
                (x + 0.571 * s, base),
            ],
            colors::MOUNTAIN_SHADE,
        ));
        out.push(poly(
            &[
                (x, y),
                (x + 0.134 * s, y + 0.157 * s),
                (x + 0.086 * s, y + 0.143 * s),
                (x + 0.029 * s, y + 0.171 * s),
                (x - 0.043 * s, y + 0.143 * s),
                (x - 0.111 * s, y + 0.171 * s),
            ],
            colors::MOUNTAIN_PEAK,
        ));
    }

    for t in &level.trees {
        let s = t.scale;
        let top = FLOOR_Y - s * 150.0;
        out.push(rect(t.x - s * 30.0, top, s * 60.0, s * 150.0, colors::TRUNK));
        out.push(poly(
            &[
                (t.x - s * 95.0, top + s * 50.0),
                (t.x, top - s * 50.0),
                (t.x + s * 105.0, top + s * 50.0),
            ],
            colors::BRANCH,
        ));
        out.push(poly(
            &[(t.x - s * 80.0, top), (t.x, top - s * 100.0), (t.x + s * 80.0, top)],
            colors::BRANCH,
        ));
        out.push(poly(
            &[
                (t.x - s * 60.0, top - s * 62.0),
                (t.x, top - s * 152.0),
                (t.x + s * 60.0, top - s * 62.0),
            ],
            colors::BRANCH,
        ));
    }

    for c in level.canyons.all() {
        out.push(rect(
            c.left(),
            FLOOR_Y,
            c.half_width * 2.0,
            CANVAS_HEIGHT - FLOOR_Y,
            colors::CANYON,
        ));
    }

    for p in &level.platforms {
        out.push(rect(p.x, p.y, p.width, 20.0, colors::LOG));
    }

    for c in level.collectables.iter().filter(|c| !c.is_found) {
        let s = c.size;
        out.push(poly(
            &[
                (c.x, c.y),
                (c.x + s * 0.25, c.y + s * 1.25),
                (c.x + s * 0.75, c.y + s * 1.25),
                (c.x + s, c.y),
            ],
            colors::CUP_BODY,
        ));
        out.push(DrawCmd::Ellipse {
            center: Vec2::new(c.x + s * 0.5, c.y),
            radii: Vec2::new(s * 0.57, s * 0.15),
            fill: colors::CUP_RIM,
        });
        out.push(DrawCmd::Ellipse {
            center: Vec2::new(c.x + s * 0.5, c.y),
            radii: Vec2::new(s * 0.425, s * 0.1),
            fill: colors::COFFEE,
        });
    }

    camp_shapes(level.camp.x, out);

    if level.camp.is_reached && settings.particles {
        for emitter in [&level.smoke, &level.fire].into_iter().flatten() {
            particle_shapes(emitter, fx, out);
        }
    }
}

fn camp_shapes(x: f32, out: &mut Vec<DrawCmd>) {
    // Log pile
    let mut log_x = x - 114.0;
    for _ in 0..5 {
        out.push(poly(
            &[
                (log_x, FLOOR_Y - 10.0),
                (log_x + 5.0, FLOOR_Y - 10.0),
                (x - 102.0, FLOOR_Y - 30.0),
                (x - 107.0, FLOOR_Y - 30.0),
            ],
            colors::LOG,
        ));
        log_x += 5.0;
    }

    // Fire ring
    let mut rock_x = x - 114.0;
    for _ in 0..5 {
        out.push(circle(rock_x, FLOOR_Y - 5.0, 10.0, colors::ROCK));
        rock_x += 6.0;
    }

    // Tent
    out.push(poly(
        &[(x - 40.0, FLOOR_Y), (x + 40.0, FLOOR_Y), (x, FLOOR_Y - 80.0)],
        colors::TENT,
    ));
    out.push(poly(
        &[
            (x, FLOOR_Y - 80.0),
            (x + 40.0, FLOOR_Y),
            (x + 120.0, FLOOR_Y),
            (x + 80.0, FLOOR_Y - 80.0),
        ],
        colors::TENT_SIDE,
    ));
    out.push(rect(x - 10.0, FLOOR_Y - 30.0, 20.0, 30.0, colors::TENT_DOOR));
}

fn particle_shapes(emitter: &Emitter, fx: &mut Sampler, out: &mut Vec<DrawCmd>) {
    for p in &emitter.particles {
        let fill = emitter.kind.sample_color(fx, p.alpha);
        out.push(DrawCmd::Ellipse {
            center: p.pos,
            radii: Vec2::splat(p.size.max(0.0) / 2.0),
            fill,
        });
    }
}

/// The backpacker, posed by facing and whether they are airborne
fn player_shapes(player: &Player, out: &mut Vec<DrawCmd>) {
    let (x, y) = (player.x, player.y);
    // Airborne poses tuck the feet up
    let lift = if player.is_falling { 13.0 } else { 0.0 };

    match player.facing() {
        Facing::Idle => {
            let raise = if player.is_falling { 3.0 } else { 0.0 };
            out.push(rect(x - 16.0, y - 42.0 - raise, 31.0, 25.0, colors::BACKPACK));
            out.push(circle(x, y - 52.0 - raise, 30.0, colors::HEAD));
            out.push(rect(x - 13.0, y - 67.0 - raise, 26.0, 7.0, colors::TOUQUE));
            let body_h = if player.is_falling { 20.0 } else { 30.0 };
            out.push(rect(x - 13.0, y - 37.0 - raise, 26.0, body_h, colors::BODY));
            out.push(rect(x - 5.0, y - 37.0 - raise, 2.0, 18.0, colors::STRAP));
            out.push(rect(x + 3.0, y - 37.0 - raise, 2.0, 18.0, colors::STRAP));
            out.push(rect(x - 13.0, y - 19.0 - raise, 26.0, 2.0, colors::STRAP));
            out.push(rect(x - 15.0, y - 7.0 - lift, 10.0, 10.0, colors::SHOE));
            out.push(rect(x + 5.0, y - 7.0 - lift, 10.0, 10.0, colors::SHOE));
        }
        Facing::Left => {
            let body_h = if player.is_falling { 20.0 } else { 30.0 };
            out.push(rect(x + 5.0, y - 42.0, 10.0, 25.0, colors::BACKPACK));
            out.push(rect(x - 18.0, y - 67.0, 30.0, 30.0, colors::HEAD));
            out.push(rect(x - 16.0, y - 67.0, 26.0, 7.0, colors::TOUQUE));
            out.push(rect(x - 8.0, y - 37.0, 13.0, body_h, colors::BODY));
            out.push(rect(x - 5.0, y - 37.0, 2.0, 18.0, colors::STRAP));
            out.push(rect(x - 8.0, y - 19.0, 13.0, 2.0, colors::STRAP));
            out.push(rect(x - 10.0, y - 7.0 - lift, 10.0, 10.0, colors::SHOE));
        }
        Facing::Right => {
            let body_h = if player.is_falling { 20.0 } else { 30.0 };
            out.push(rect(x - 14.0, y - 42.0, 10.0, 25.0, colors::BACKPACK));
            out.push(rect(x - 10.0, y - 67.0, 30.0, 30.0, colors::HEAD));
            out.push(rect(x - 8.0, y - 67.0, 26.0, 7.0, colors::TOUQUE));
            out.push(rect(x - 3.0, y - 37.0, 13.0, body_h, colors::BODY));
            out.push(rect(x + 5.0, y - 37.0, 2.0, 18.0, colors::STRAP));
            out.push(rect(x - 3.0, y - 19.0, 13.0, 2.0, colors::STRAP));
            out.push(rect(x + 2.0, y - 7.0 - lift, 10.0, 10.0, colors::SHOE));
        }
    }
}

fn text(x: f32, y: f32, s: impl Into<String>) -> DrawCmd {
    DrawCmd::Text {
        x,
        y,
        size: 20.0,
        text: s.into(),
    }
}

fn overlay(state: &GameState, out: &mut Vec<DrawCmd>) {
    out.push(text(10.0, 30.0, format!("Level: {}", state.level_number)));
    out.push(text(10.0, 60.0, format!("Score: {}", state.score)));
    out.push(text(10.0, 90.0, format!("Lives: {}", state.lives)));
}

fn prompts(state: &GameState, out: &mut Vec<DrawCmd>) {
    match state.phase {
        GamePhase::GameOver => out.push(text(
            CANVAS_WIDTH * 0.35,
            CANVAS_HEIGHT / 2.0,
            "Game over. Press space to continue.",
        )),
        GamePhase::LevelComplete => out.push(text(
            CANVAS_WIDTH * 0.3,
            CANVAS_HEIGHT / 2.0,
            "Level complete. Press space to continue.",
        )),
        GamePhase::Playing => {}
    }
}
