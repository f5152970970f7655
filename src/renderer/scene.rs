//! Scene builders for the game and the editor

use glam::DVec2;

use super::{Color, DrawCommand, Scene, colors};
use crate::assets::ItemCatalog;
use crate::editor::{Editor, Shape};
use crate::map::MapData;
use crate::sim::{Contact, GamePhase, Session, closest_point};

const LINE_WIDTH: f64 = 3.0;
const CONTACT_MARKER_RADIUS: f64 = 3.0;
const HUD_TEXT_SIZE: f64 = 24.0;
const COUNTDOWN_TEXT_SIZE: f64 = 96.0;
const BANNER_TEXT_SIZE: f64 = 64.0;

/// Meters to pixels
struct View {
    ppm: f64,
}

impl View {
    fn px(&self, meters: DVec2) -> DVec2 {
        meters * self.ppm
    }

    fn len(&self, meters: f64) -> f64 {
        meters * self.ppm
    }
}

fn text(scene: &mut Scene, text: String, pos: DVec2, size: f64, color: Color) {
    scene.push(DrawCommand::Text {
        text,
        pos,
        size,
        color,
    });
}

fn goal_line(scene: &mut Scene, y: f64, color: Color) {
    scene.push(DrawCommand::Line {
        start: DVec2::new(0.0, y),
        end: DVec2::new(scene.width, y),
        width: LINE_WIDTH,
        color,
    });
}

/// Build the frame for a play session
pub fn build_scene(session: &Session, catalog: &ItemCatalog) -> Scene {
    let size = session.board.canvas_width;
    let mut scene = Scene::new(size, size);
    let view = View {
        ppm: session.board.pixel_per_meter,
    };

    scene.push(DrawCommand::Polygon {
        points: session
            .board
            .board
            .corners()
            .iter()
            .map(|&c| view.px(c))
            .collect(),
        color: colors::BOARD,
    });

    for segment in &session.board.segments {
        scene.push(DrawCommand::Line {
            start: view.px(segment.start),
            end: view.px(segment.end),
            width: LINE_WIDTH,
            color: colors::SEGMENT,
        });
    }

    scene.push(DrawCommand::Circle {
        center: view.px(session.ball.pos),
        radius: view.len(session.ball.radius),
        color: colors::BALL,
    });

    if let Some(Contact::Rolling { segment }) = session.last_contact {
        if let Some(segment) = session.board.segments.get(segment) {
            scene.push(DrawCommand::Circle {
                center: view.px(closest_point(session.ball.pos, segment)),
                radius: CONTACT_MARKER_RADIUS,
                color: colors::CONTACT,
            });
        }
    }

    for item in &session.board.items {
        let top_left = view.px(item.pos - DVec2::splat(item.radius));
        let size = view.len(item.radius * 2.0);
        match catalog.image(item.visual) {
            Some(name) => scene.push(DrawCommand::Image {
                name: name.to_string(),
                top_left,
                size,
            }),
            // No image assigned: fall back to a plain disc
            None => scene.push(DrawCommand::Circle {
                center: view.px(item.pos),
                radius: size / 2.0,
                color: colors::ITEM,
            }),
        }
    }

    goal_line(&mut scene, view.len(session.board.goal.y), colors::GOAL);

    hud(&mut scene, session);
    scene
}

fn hud(scene: &mut Scene, session: &Session) {
    let attempt = &session.attempt;
    let center = DVec2::new(scene.width / 2.0, scene.height / 2.0);

    text(
        scene,
        format!("Life: {}", attempt.life),
        DVec2::new(10.0, 10.0),
        HUD_TEXT_SIZE,
        colors::TEXT,
    );
    text(
        scene,
        format!("Score: {}", attempt.score.max(0)),
        DVec2::new(10.0, 40.0),
        HUD_TEXT_SIZE,
        colors::TEXT,
    );

    if let Some(left) = session.countdown_remaining().filter(|&n| n > 0) {
        text(
            scene,
            left.to_string(),
            center,
            COUNTDOWN_TEXT_SIZE,
            colors::TEXT,
        );
    }

    let banner = match attempt.phase {
        GamePhase::Cleared => Some("CLEAR!"),
        GamePhase::GameOver => Some("GAME OVER"),
        _ => None,
    };
    if let Some(banner) = banner {
        text(
            scene,
            banner.to_string(),
            center,
            BANNER_TEXT_SIZE,
            colors::BANNER,
        );
        text(
            scene,
            "Press Space to retry".to_string(),
            center + DVec2::new(0.0, BANNER_TEXT_SIZE),
            HUD_TEXT_SIZE,
            colors::TEXT,
        );
    }
}

/// Build the editor frame: the document, the drag preview at `cursor`
/// (pixels) and the current mode
pub fn build_editor_scene(editor: &Editor, cursor: DVec2, canvas_size: f64) -> Scene {
    let mut scene = Scene::new(canvas_size, canvas_size);
    let view = View {
        ppm: editor.settings().pixel_per_meter,
    };

    draw_document(&mut scene, &view, editor.document());
    if let Some(shape) = editor.preview(cursor) {
        draw_shape(&mut scene, &view, &shape, colors::PREVIEW);
    }

    text(
        &mut scene,
        format!("Mode: {}", editor.mode().as_str()),
        DVec2::new(10.0, 10.0),
        HUD_TEXT_SIZE,
        colors::TEXT,
    );
    scene
}

fn draw_document(scene: &mut Scene, view: &View, map: &MapData) {
    let rect = map.rect;
    draw_shape(
        scene,
        view,
        &Shape::Rectangle {
            lx: rect.lx,
            ly: rect.ly,
            rx: rect.rx,
            ry: rect.ry,
        },
        colors::BOARD,
    );
    for line in &map.lines {
        draw_shape(
            scene,
            view,
            &Shape::Segment {
                start: DVec2::new(line.sx, line.sy),
                end: DVec2::new(line.gx, line.gy),
            },
            colors::SEGMENT,
        );
    }
    draw_shape(
        scene,
        view,
        &Shape::Ball {
            center: DVec2::new(map.ball.x, map.ball.y),
            radius: map.ball.r,
        },
        colors::BALL,
    );
    for item in &map.items {
        draw_shape(
            scene,
            view,
            &Shape::Item {
                center: DVec2::new(item.x, item.y),
                radius: item.r,
            },
            colors::ITEM,
        );
    }
    draw_shape(scene, view, &Shape::GoalLine { y: map.goal_y }, colors::GOAL);
}

fn draw_shape(scene: &mut Scene, view: &View, shape: &Shape, color: Color) {
    match *shape {
        Shape::Rectangle { lx, ly, rx, ry } => scene.push(DrawCommand::Polygon {
            points: [
                DVec2::new(lx, ly),
                DVec2::new(lx, ry),
                DVec2::new(rx, ry),
                DVec2::new(rx, ly),
            ]
            .iter()
            .map(|&c| view.px(c))
            .collect(),
            color,
        }),
        Shape::Segment { start, end } => scene.push(DrawCommand::Line {
            start: view.px(start),
            end: view.px(end),
            width: LINE_WIDTH,
            color,
        }),
        Shape::Ball { center, radius } | Shape::Item { center, radius } => {
            scene.push(DrawCommand::Circle {
                center: view.px(center),
                radius: view.len(radius),
                color,
            })
        }
        Shape::GoalLine { y } => goal_line(scene, view.len(y), color),
    }
}
