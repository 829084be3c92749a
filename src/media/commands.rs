use std::fmt;
use std::path::Path;

/// Transcoder command line as an ordered token list. Nothing here spawns a process.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-vcodec").arg(codec)
    }

    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-acodec").arg(codec)
    }

    /// Binary followed by every argument
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.binary_path.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for MediaCommand {
    /// Single shell-quoted line, suitable for copy and paste
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .to_argv()
            .iter()
            .map(|token| shell_quote(token))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", line)
    }
}

/// Quote `token` for a POSIX shell when it contains anything but safe characters
pub fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=:/.,+@%".contains(c));
    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', "'\\''"))
    }
}

/// Builder for common media processing operations
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// `-y -i <input> -vcodec .. -acodec .. <tokens> <extra_options> <output>`
    pub fn transcode<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        video_codec: &str,
        audio_codec: &str,
        tokens: Vec<String>,
        extra_options: &[String],
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Transcode")
            .overwrite()
            .input(input_path)
            .video_codec(video_codec)
            .audio_codec(audio_codec)
            .args(tokens)
            .args(extra_options.iter().cloned())
            .output(output_path)
    }
}
