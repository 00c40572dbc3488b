// main.rs      trigif command
//
// Copyright (c) 2026  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches};
use pix::rgb::SRgb8;
use std::error::Error;
use std::io::Write;
use std::process;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use trigif::{
    draw_triangle, fill_triangle, Animation, PixelBuffer, Repeat, Settings,
    Triangle,
};

/// Crate version
const VERSION: &'static str = std::env!("CARGO_PKG_VERSION");

/// Default frame colors
const COLORS: &[&str] =
    &["ff0000", "00ff00", "0000ff", "ffff00", "ff00ff", "00ffff"];

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let matches = create_app().get_matches();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    if let Err(err) = render(&mut out, &matches) {
        let mut err_out = StandardStream::stderr(ColorChoice::Auto);
        let mut red = ColorSpec::new();
        red.set_fg(Some(Color::Red)).set_intense(true);
        err_out.set_color(&red)?;
        writeln!(err_out, "{}", err)?;
        err_out.reset()?;
        process::exit(1);
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("trigif")
        .version(VERSION)
        .about("Render an animated GIF of colored triangles")
        .setting(AppSettings::ColoredHelp)
        .arg(
            Arg::with_name("output")
                .default_value("output.gif")
                .help("output file"),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .short("s")
                .takes_value(true)
                .default_value("256")
                .validator(|v| parse_size(&v).map(|_| ()))
                .help("frame width and height"),
        )
        .arg(
            Arg::with_name("color")
                .long("color")
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|v| parse_color(&v).map(|_| ()))
                .help("frame color (RRGGBB), once per frame"),
        )
        .arg(
            Arg::with_name("interval")
                .long("interval")
                .short("i")
                .takes_value(true)
                .default_value("0.1")
                .validator(|v| parse_interval(&v).map(|_| ()))
                .help("seconds between frames"),
        )
        .arg(
            Arg::with_name("quality")
                .long("quality")
                .short("q")
                .takes_value(true)
                .default_value("100")
                .validator(|v| parse_quality(&v).map(|_| ()))
                .help("quality (1-100)"),
        )
        .arg(
            Arg::with_name("repeat")
                .long("repeat")
                .short("r")
                .takes_value(true)
                .default_value("forever")
                .validator(|v| parse_repeat(&v).map(|_| ()))
                .help("repeat count, \"forever\" or \"once\""),
        )
        .arg(
            Arg::with_name("matte")
                .long("matte")
                .short("m")
                .takes_value(true)
                .validator(|v| parse_color(&v).map(|_| ()))
                .help("matte color (RRGGBB) for transparent pixels"),
        )
        .arg(
            Arg::with_name("fill")
                .long("fill")
                .short("f")
                .help("fill triangles solid instead of outlining"),
        )
}

/// Parse a frame size
fn parse_size(v: &str) -> Result<u32, String> {
    match v.parse::<u32>() {
        Ok(sz) if sz > 0 && sz <= u32::from(u16::MAX) => Ok(sz),
        _ => Err(format!("invalid size: {}", v)),
    }
}

/// Parse a quality value
fn parse_quality(v: &str) -> Result<u8, String> {
    match v.parse::<u8>() {
        Ok(q) if (1..=100).contains(&q) => Ok(q),
        _ => Err(format!("invalid quality: {}", v)),
    }
}

/// Parse an RRGGBB color
fn parse_color(v: &str) -> Result<SRgb8, String> {
    let hex = v.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("invalid color: {}", v));
    }
    match u32::from_str_radix(hex, 16) {
        Ok(c) => Ok(SRgb8::new((c >> 16) as u8, (c >> 8) as u8, c as u8)),
        Err(_) => Err(format!("invalid color: {}", v)),
    }
}

/// Parse a frame interval
fn parse_interval(v: &str) -> Result<f64, String> {
    match v.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(format!("invalid interval: {}", v)),
    }
}

/// Parse a repeat count
fn parse_repeat(v: &str) -> Result<Repeat, String> {
    match v {
        "forever" => Ok(Repeat::Infinite),
        "once" => Ok(Repeat::Once),
        _ => v
            .parse::<u16>()
            .map(Repeat::Times)
            .map_err(|_| format!("invalid repeat: {}", v)),
    }
}

/// Render frames and encode the animation
fn render(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let path = matches.value_of_os("output").unwrap_or_default();
    let size = parse_size(matches.value_of("size").unwrap_or_default())?;
    let interval =
        parse_interval(matches.value_of("interval").unwrap_or_default())?;
    let quality = parse_quality(matches.value_of("quality").unwrap_or_default())?;
    let repeat = parse_repeat(matches.value_of("repeat").unwrap_or_default())?;
    let colors = match matches.values_of("color") {
        Some(values) => {
            values.map(parse_color).collect::<Result<Vec<_>, _>>()?
        }
        None => COLORS
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<_, _>>()?,
    };
    let mut settings = Settings::new(size, size)
        .with_quality(quality)
        .with_repeat(repeat);
    if let Some(matte) = matches.value_of("matte") {
        settings = settings.with_matte(parse_color(matte)?);
    }
    let mut anim = Animation::new(settings)
        .map_err(|e| format!("Failed to initialize GIF encoder: {}", e))?;
    let fill = matches.is_present("fill");
    for (i, clr) in colors.iter().enumerate() {
        let mut buf = PixelBuffer::new(size, size);
        if fill {
            fill_triangle(&mut buf, &Triangle::inset(size, size), *clr);
        } else {
            draw_triangle(&mut buf, *clr);
        }
        anim.add_frame(i as u32, &buf, i as f64 * interval)?;
    }
    anim.finish_file(path)?;
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&bold)?;
    writeln!(
        out,
        "GIF created: {} ({} frames)",
        path.to_string_lossy(),
        colors.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(parse_color("ff8000"), Ok(SRgb8::new(255, 128, 0)));
        assert_eq!(parse_color("#00FF7f"), Ok(SRgb8::new(0, 255, 127)));
        assert!(parse_color("fff").is_err());
        assert!(parse_color("gg0000").is_err());
        for c in COLORS {
            assert!(parse_color(c).is_ok());
        }
    }

    #[test]
    fn repeat() {
        assert_eq!(parse_repeat("forever"), Ok(Repeat::Infinite));
        assert_eq!(parse_repeat("once"), Ok(Repeat::Once));
        assert_eq!(parse_repeat("3"), Ok(Repeat::Times(3)));
        assert!(parse_repeat("-1").is_err());
    }

    #[test]
    fn args() {
        let args = vec!["trigif", "-c", "112233", "-c", "445566", "x.gif"];
        let m = create_app().get_matches_from_safe(args).unwrap();
        assert_eq!(m.value_of("output"), Some("x.gif"));
        assert_eq!(m.values_of("color").unwrap().count(), 2);
        assert_eq!(m.value_of("size"), Some("256"));
        assert!(!m.is_present("fill"));
        assert!(create_app()
            .get_matches_from_safe(vec!["trigif", "--size", "0"])
            .is_err());
    }

    #[test]
    fn sizes() {
        assert_eq!(parse_size("256"), Ok(256));
        assert!(parse_size("0").is_err());
        assert!(parse_size("70000").is_err());
        assert_eq!(parse_interval("0.25"), Ok(0.25));
        assert_eq!(parse_quality("100"), Ok(100));
        assert_eq!(parse_quality("1"), Ok(1));
        assert_eq!(parse_quality("300"), Err("invalid quality: 300".into()));
        assert!(parse_quality("0").is_err());
        assert!(create_app()
            .get_matches_from_safe(vec!["trigif", "--quality", "300"])
            .is_err());
        assert!(parse_interval("-1").is_err());
    }
}
