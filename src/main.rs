use glam::{DVec3, IVec2, Mat4, Vec2, Vec3};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::Point;

mod config;
mod error;
mod hud;
mod inventory;
mod item;
mod sdl_surface;
mod text;

use config::HudConfig;
use error::HudError;
use hud::{
    Aabb, CommandQueue, FrameContext, HighlightMode, HotbarParam, Hud, HudCommand, HudDirection,
    HudElementDef, HudElementKind, HudFlags, HudId, StatUpdate,
};
use inventory::InventoryLists;
use item::ItemStack;
use sdl_surface::{SdlSurface, TextureCache};
use text::BitmapFont;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const ASSET_DIR: &str = "assets/hud";
const FONT_SCALE: u32 = 2;
/// Beyond this yaw the targeted block leaves the view
const TARGET_VIEW_YAW: f32 = 0.6;
const HOTBAR_SCRIPT: &str = r#"{"op": "hotbar", "param": {"image": "hotbar.png"}}"#;

/// Textures the demo falls back to generating when the asset is missing
const DEMO_TEXTURES: &[(&str, (u32, u32), Color)] = &[
    ("heart.png", (24, 24), Color::RGBA(220, 40, 40, 255)),
    ("bubble.png", (24, 24), Color::RGBA(80, 160, 255, 255)),
    ("shield.png", (24, 24), Color::RGBA(170, 170, 190, 255)),
    ("logo.png", (96, 24), Color::RGBA(60, 140, 60, 220)),
    ("halo.png", (16, 16), Color::RGBA(255, 255, 255, 255)),
    ("hotbar.png", (16, 16), Color::RGBA(20, 20, 20, 140)),
    ("dirt", (16, 16), Color::RGBA(120, 80, 40, 255)),
    ("stone", (16, 16), Color::RGBA(128, 128, 128, 255)),
    ("pickaxe", (16, 16), Color::RGBA(200, 200, 60, 255)),
];

/// Player position far from the origin so the camera offset matters
const PLAYER_START: DVec3 = DVec3::new(30_000.5, 12.0, -20_000.5);

fn hotbar_slot(key: Keycode) -> Option<usize> {
    let slot = match key {
        Keycode::Num1 => 0,
        Keycode::Num2 => 1,
        Keycode::Num3 => 2,
        Keycode::Num4 => 3,
        Keycode::Num5 => 4,
        Keycode::Num6 => 5,
        Keycode::Num7 => 6,
        Keycode::Num8 => 7,
        Keycode::Num9 => 8,
        _ => return None,
    };
    Some(slot)
}

fn demo_inventory() -> InventoryLists {
    let mut inventory = InventoryLists::new();
    inventory.add_list("main", 32);
    inventory.set_slot("main", 0, Some(ItemStack::new("dirt", 64)));
    inventory.set_slot("main", 1, Some(ItemStack::new("stone", 12)));
    inventory.set_slot("main", 2, Some(ItemStack::new("pickaxe", 1).with_wear(40_000)));
    inventory.set_slot("main", 4, Some(ItemStack::new("torch", 5)));
    inventory.set_slot("main", 8, Some(ItemStack::new("apple", 3)));

    inventory.add_list("craft", 3);
    inventory.set_slot("craft", 0, Some(ItemStack::new("stone", 2)));
    inventory.set_slot("craft", 2, Some(ItemStack::new("dirt", 1)));
    inventory
}

fn log_selected(inventory: &InventoryLists, slot: usize) {
    match inventory.slot("main", slot) {
        Some(stack) => log::info!("slot {}: {} x{}", slot + 1, stack.item_id, stack.quantity),
        None => log::info!("slot {}: empty", slot + 1),
    }
}

/// Looking at the block in front of and below the player
fn target_block(hud: &mut Hud) {
    let block = (PLAYER_START + DVec3::new(0.0, -2.0, -4.0)).floor();
    let selection = hud.selection_mut();
    selection.set_target(
        block,
        &[
            Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.5, 1.0)),
            Aabb::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.5, 1.0, 1.0)),
        ],
    );
    selection.set_face_normal(Vec3::Y);
}

/// What a mod script would send on join
fn send_demo_elements(queue: &CommandQueue) -> Result<(), HudError> {
    let scripts = queue.sender();
    scripts.send(HudCommand::Hotbar {
        param: HotbarParam::ItemCount(9),
    });
    scripts.send(HudCommand::from_json(HOTBAR_SCRIPT)?);
    scripts.send(HudCommand::Add {
        element: HudElementDef {
            position: Vec2::new(0.0, 0.0),
            text: "voxel-hud demo".to_string(),
            number: 0xFFFF80,
            alignment: Vec2::new(1.0, 1.0),
            offset: Vec2::new(8.0, 8.0),
            ..HudElementDef::new(HudElementKind::Text)
        },
    });
    scripts.send(HudCommand::Add {
        element: HudElementDef {
            position: Vec2::new(1.0, 0.0),
            name: "logo.png".to_string(),
            scale: Vec2::new(2.0, 2.0),
            alignment: Vec2::new(-1.0, 1.0),
            offset: Vec2::new(-8.0, 8.0),
            ..HudElementDef::new(HudElementKind::Image)
        },
    });
    scripts.send(HudCommand::Add {
        element: HudElementDef {
            position: Vec2::new(0.5, 1.0),
            text: "shield.png".to_string(),
            number: 13,
            offset: Vec2::new(25.0, -106.0),
            size: IVec2::new(24, 24),
            ..HudElementDef::new(HudElementKind::StatBar)
        },
    });
    scripts.send(HudCommand::Add {
        element: HudElementDef {
            position: Vec2::new(1.0, 0.5),
            text: "craft".to_string(),
            number: 3,
            item: 1,
            direction: HudDirection::TopBottom,
            offset: Vec2::new(-64.0, -90.0),
            ..HudElementDef::new(HudElementKind::Inventory)
        },
    });
    scripts.send(HudCommand::Add {
        element: HudElementDef {
            name: "Spawn".to_string(),
            text: " m".to_string(),
            number: 0x80FF80,
            world_position: PLAYER_START + DVec3::new(12.0, 2.0, -40.0),
            ..HudElementDef::new(HudElementKind::Waypoint)
        },
    });
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let config = HudConfig::load_or_default(HudConfig::default_path()).map_err(|e| e.to_string())?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window("voxel-hud", WINDOW_WIDTH, WINDOW_HEIGHT)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let mut textures = TextureCache::new(&texture_creator, ASSET_DIR);
    for (name, size, color) in DEMO_TEXTURES {
        textures.load_or_generate(name, *size, *color)?;
    }
    log::info!("textures ready from {}", textures.asset_dir().display());

    let inventory = demo_inventory();
    let mut hud = Hud::new(&config);
    let queue = CommandQueue::new();
    send_demo_elements(&queue)?;
    hud.selection_mut().set_mesh_color(Color::RGBA(255, 240, 200, 255));
    target_block(&mut hud);

    let font = BitmapFont::new(FONT_SCALE);
    let mut flags = HudFlags::ALL;
    let mut selected_item = 0usize;
    let mut yaw = 0.0f32;
    let mut frame_count = 0u64;
    let mut title_id: Option<HudId> = None;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::H),
                    ..
                } => {
                    let selection = hud.selection_mut();
                    let mode = match selection.mode() {
                        HighlightMode::Halo => HighlightMode::Box,
                        _ => HighlightMode::Halo,
                    };
                    selection.set_mode(mode);
                    log::info!(
                        "highlight mode: {:?} ({} halo vertices)",
                        mode,
                        selection.halo().map_or(0, |h| h.vertices.len())
                    );
                }
                Event::KeyDown {
                    keycode: Some(Keycode::F1),
                    ..
                } => {
                    flags = if flags == HudFlags::NONE {
                        HudFlags::ALL
                    } else {
                        HudFlags::NONE
                    };
                }
                Event::KeyDown {
                    keycode: Some(Keycode::F2),
                    ..
                } => {
                    let crosshair = if flags.contains(HudFlags::CROSSHAIR) {
                        HudFlags::NONE
                    } else {
                        HudFlags::CROSSHAIR
                    };
                    flags = flags.with_masked(crosshair, HudFlags::CROSSHAIR);
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Left),
                    ..
                } => yaw += 0.05,
                Event::KeyDown {
                    keycode: Some(Keycode::Right),
                    ..
                } => yaw -= 0.05,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(slot) = hotbar_slot(key) {
                        selected_item = slot.min(hud.hotbar().item_count as usize - 1);
                        log_selected(&inventory, selected_item);
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    let clicked = hud
                        .layout()
                        .slots()
                        .iter()
                        .position(|slot| slot.contains_point(Point::new(x, y)));
                    if let Some(slot) = clicked {
                        selected_item = slot;
                        log_selected(&inventory, selected_item);
                    }
                }
                _ => {}
            }
        }

        let in_view = yaw.abs() < TARGET_VIEW_YAW;
        if in_view != hud.selection().has_target() {
            if in_view {
                target_block(&mut hud);
            } else {
                hud.selection_mut().clear_target();
            }
        }

        let added = hud.drain_commands(&queue);
        if title_id.is_none() {
            title_id = added.first().copied();
        }
        frame_count += 1;
        if let Some(id) = title_id
            .filter(|id| frame_count % 60 == 0 && hud.elements().contains(*id))
        {
            let update = StatUpdate::Text(format!("voxel-hud demo  frame {}", frame_count));
            queue.sender().send(HudCommand::change(id, &update));
        }

        let camera_offset = PLAYER_START.floor().as_ivec3();
        let eye = (PLAYER_START + DVec3::new(0.0, 1.6, 0.0) - camera_offset.as_dvec3()).as_vec3();
        let forward = Vec3::new(-yaw.sin(), -0.35, -yaw.cos()).normalize();
        let (width, height) = canvas.viewport().size();
        let view_projection = Mat4::perspective_rh(
            70f32.to_radians(),
            width as f32 / height.max(1) as f32,
            0.1,
            500.0,
        ) * Mat4::look_at_rh(eye, eye + forward, Vec3::Y);

        let frame = FrameContext {
            flags,
            camera_offset,
            view_projection,
            player_position: PLAYER_START,
            selected_item,
            health: 17,
            breath: 7,
            inventory: &inventory,
        };

        canvas.set_draw_color(Color::RGB(110, 160, 220));
        canvas.clear();
        {
            let spin = (frame_count as f64 * 3.0) % 360.0;
            let mut surface =
                SdlSurface::new(&mut canvas, &mut textures, font, view_projection, spin);
            hud.draw(&mut surface, &frame).map_err(HudError::Render)?;
        }
        canvas.present();

        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    log::info!(
        "shutting down with {} HUD element(s), {} halo rebuild(s)",
        hud.elements().len(),
        hud.selection().regenerations()
    );
    Ok(())
}
