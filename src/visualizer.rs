use minifb::{Key, Window, WindowOptions};
use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::field::{IconField, RenderedIcon, VisibilityChange};
use crate::math::percent_to_px;
use crate::particle::Viewport;
use crate::scheduler::FrameScheduler;
use crate::sprite::IconArt;

const SLATE_900: u32 = 0x0F172A;
const PURPLE_900: u32 = 0x581C87;

fn lerp_channel(a: u32, b: u32, shift: u32, t: f32) -> u32 {
    let ca = ((a >> shift) & 0xFF) as f32;
    let cb = ((b >> shift) & 0xFF) as f32;
    ((ca + (cb - ca) * t).round() as u32) << shift
}

fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    lerp_channel(a, b, 16, t) | lerp_channel(a, b, 8, t) | lerp_channel(a, b, 0, t)
}

/// Diagonal slate → purple → slate backdrop.
fn backdrop(x: usize, y: usize, width: usize, height: usize) -> u32 {
    let t = (x as f32 / width as f32 + y as f32 / height as f32) / 2.0;
    if t < 0.5 {
        lerp_color(SLATE_900, PURPLE_900, t * 2.0)
    } else {
        lerp_color(PURPLE_900, SLATE_900, (t - 0.5) * 2.0)
    }
}

fn draw_icon(buffer: &mut [u32], width: usize, height: usize, icon: &RenderedIcon, art: &IconArt, opacity: f32) {
    let x0 = percent_to_px(icon.left, width);
    let y0 = percent_to_px(icon.top, height);
    let size = icon.size.max(1.0);

    let first_x = x0.max(0.0) as usize;
    let first_y = y0.max(0.0) as usize;
    let last_x = ((x0 + size).ceil().max(0.0) as usize).min(width);
    let last_y = ((y0 + size).ceil().max(0.0) as usize).min(height);

    for y in first_y..last_y {
        let v = (y as f64 + 0.5 - y0) / size;
        if !(0.0..1.0).contains(&v) {
            continue;
        }
        for x in first_x..last_x {
            let u = (x as f64 + 0.5 - x0) / size;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            let (color, coverage) = art.sample(u, v);
            let alpha = coverage * opacity;
            if alpha > 0.0 {
                let idx = y * width + x;
                buffer[idx] = lerp_color(buffer[idx], color, alpha);
            }
        }
    }
}

/// Paint one frame: backdrop first, then every icon blended at `opacity`.
/// Icons partly outside the buffer are clipped.
pub fn draw_frame(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    icons: &[RenderedIcon],
    art: &[IconArt],
    opacity: f32,
) {
    for y in 0..height {
        for x in 0..width {
            buffer[y * width + x] = backdrop(x, y, width, height);
        }
    }
    for icon in icons {
        if let Some(art) = art.get(icon.index) {
            draw_icon(buffer, width, height, icon, art, opacity);
        }
    }
}

/// Open a resizable preview window and animate `field` until it is closed.
///
/// Blocks the calling thread; particle tasks run on `scheduler`'s runtime.
pub fn run_visualizer<R: Rng>(mut field: IconField, scheduler: FrameScheduler, rng: &mut R) -> Result<()> {
    let viewport = field.viewport();
    let (mut width, mut height) = (viewport.width() as usize, viewport.height() as usize);

    let mut window = Window::new(
        "icon drift",
        width,
        height,
        WindowOptions { resize: true, ..WindowOptions::default() },
    )?;
    window.set_target_fps(field.config().frames_per_second as usize);

    let art = IconArt::load_all(&field.config().icons);
    let opacity = field.config().opacity;
    let mut buffer: Vec<u32> = vec![0; width * height];

    field.mount(rng);
    field.animate(&scheduler);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let (w, h) = window.get_size();
        if (w, h) != (width, height) && w > 0 && h > 0 {
            width = w;
            height = h;
            buffer.resize(width * height, 0);
            let change = field.resize(Viewport::new(width as u32, height as u32), rng);
            if change == VisibilityChange::Shown {
                field.animate(&scheduler);
            }
        }

        draw_frame(&mut buffer, width, height, &field.snapshot(), &art, opacity);
        window.update_with_buffer(&buffer, width, height)?;
    }

    info!("preview window closed");
    field.unmount();
    Ok(())
}
