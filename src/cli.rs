use clap::Parser;

/// Turn a folder of photos into a timelapse video.
#[derive(Debug, Parser)]
#[command(name = "timelapse", version)]
pub struct Cli {
    /// Framerate for the timelapse video (prompted when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub framerate: Option<u32>,

    /// Keep one image out of every N (prompted when omitted)
    #[arg(short, long, value_parser = parse_skip_frames)]
    pub skip_frames: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_skip_frames(value: &str) -> Result<usize, String> {
    let skip_frames: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a whole number"))?;
    if skip_frames == 0 {
        return Err("skip frames must be at least 1".to_string());
    }
    Ok(skip_frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from(["timelapse", "-f", "24", "-s", "3"]).unwrap();
        assert_eq!(cli.framerate, Some(24));
        assert_eq!(cli.skip_frames, Some(3));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_long_flags() {
        let cli =
            Cli::try_parse_from(["timelapse", "--framerate", "30", "--skip-frames", "1", "-v"])
                .unwrap();
        assert_eq!(cli.framerate, Some(30));
        assert_eq!(cli.skip_frames, Some(1));
        assert!(cli.verbose);
    }

    #[test]
    fn test_flags_are_optional() {
        let cli = Cli::try_parse_from(["timelapse"]).unwrap();
        assert_eq!(cli.framerate, None);
        assert_eq!(cli.skip_frames, None);
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert!(Cli::try_parse_from(["timelapse", "-f", "0"]).is_err());
        assert!(Cli::try_parse_from(["timelapse", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["timelapse", "-s", "-2"]).is_err());
        assert!(Cli::try_parse_from(["timelapse", "-f", "fast"]).is_err());
    }
}
