use eframe::egui;

// ── Packed RGBA ─────────────────────────────────────────────────────────────
//
// Colors are stored as a single u32, R in the most significant byte and A in
// the least: 0xRRGGBBAA. The color pickers work in unmultiplied float RGBA,
// every channel (alpha included) in 0.0..=1.0.

pub const BLACK: u32 = 0x0000_00ff;
pub const GREEN: u32 = 0x00ff_00ff;
pub const YELLOW: u32 = 0xffff_00ff;
pub const TRANSPARENT: u32 = 0x0000_0000;

fn channel_to_byte(c: f32) -> u32 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Pack picker channels `[r, g, b, a]` into `0xRRGGBBAA`.
pub fn pack_rgba(rgba: [f32; 4]) -> u32 {
    let [r, g, b, a] = rgba.map(channel_to_byte);
    (r << 24) | (g << 16) | (b << 8) | a
}

/// Inverse of [`pack_rgba`]. Exact for every packed value.
pub fn unpack_rgba(packed: u32) -> [f32; 4] {
    bytes(packed).map(|b| b as f32 / 255.0)
}

fn bytes(packed: u32) -> [u8; 4] {
    packed.to_be_bytes()
}

pub fn to_color32(packed: u32) -> egui::Color32 {
    let [r, g, b, a] = bytes(packed);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
