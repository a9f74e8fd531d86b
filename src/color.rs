use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Default colour cycle
// ---------------------------------------------------------------------------

/// The default property cycle ("C0" … "C9") used by matplotlib, which the
/// simulation's own plots were made with.
const CYCLE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Colour `C{index}`; wraps around after ten entries.
pub fn cycle_color(index: usize) -> Color32 {
    parse_hex(CYCLE[index % CYCLE.len()]).unwrap_or(Color32::GRAY)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = hex.parse().ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}
