// cargo fuzz run raster corpus/raster -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;
use pix::rgb::SRgb8;

use trigif::{draw_line, draw_triangle, fill_triangle, PixelBuffer, Triangle};

fn coord(data: &[u8], i: usize) -> i32 {
    i32::from(i16::from_le_bytes([data[i], data[i + 1]]))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 14 {
        return;
    }
    let width = u32::from(data[0]);
    let height = u32::from(data[1]);
    let tri = Triangle::new(
        (coord(data, 2), coord(data, 4)),
        (coord(data, 6), coord(data, 8)),
        (coord(data, 10), coord(data, 12)),
    );
    let clr = SRgb8::new(data[0], data[1], 255);
    let mut buf = PixelBuffer::new(width, height);
    let [a, b, _] = tri.vertices;
    draw_line(&mut buf, a, b, clr);
    draw_triangle(&mut buf, clr);
    fill_triangle(&mut buf, &tri, clr);
    assert_eq!(
        buf.as_u8_slice().len(),
        width as usize * height as usize * 4
    );
});
