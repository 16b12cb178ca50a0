//! Error types for urbansas-filter.

use std::path::PathBuf;

/// Result type alias for urbansas-filter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for urbansas-filter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Source dataset annotations are missing.
    #[error("dataset annotations not found at '{path}'")]
    DatasetNotFound {
        /// Expected annotation file.
        path: PathBuf,
    },

    /// Failed to open or read an annotation table.
    #[error("failed to read annotation file '{path}'")]
    AnnotationRead {
        /// Path to the annotation file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Annotation table is missing a required column.
    #[error("annotation file '{path}' has no '{column}' column")]
    MissingColumn {
        /// Path to the annotation file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// Annotation row could not be interpreted.
    #[error("invalid annotation in '{path}': {message}")]
    InvalidAnnotationFormat {
        /// Path to the annotation file.
        path: PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// Failed to write an annotation table.
    #[error("failed to write annotation file '{path}'")]
    AnnotationWrite {
        /// Path to the annotation file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Framewise counts of a file are not sorted or have gaps.
    #[error("malformed frame counts for '{filename}': {message}")]
    MalformedFrameCounts {
        /// Source file identifier.
        filename: String,
        /// Description of the violation.
        message: String,
    },

    /// Media file for an annotated recording does not exist.
    #[error("media file for '{filename}' not found, expected '{path}'")]
    SourceMediaNotFound {
        /// Source file identifier.
        filename: String,
        /// Expected media path.
        path: PathBuf,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg could not be started.
    #[error("failed to run '{program}' (is ffmpeg installed?)")]
    FfmpegNotFound {
        /// Program that was spawned.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg exited with an error.
    #[error("ffmpeg failed writing '{path}' (exit code {code:?}): {stderr}")]
    FfmpegFailed {
        /// Output clip path.
        path: PathBuf,
        /// Process exit code, if any.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// Failed to write the segment manifest.
    #[error("failed to write segment manifest '{path}'")]
    ManifestWrite {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Run was stopped by the user.
    #[error("interrupted after {files_completed} of {files_total} files")]
    Interrupted {
        /// Files fully processed before the interrupt.
        files_completed: usize,
        /// Files in the dataset.
        files_total: usize,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
