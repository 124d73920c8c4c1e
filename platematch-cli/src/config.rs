use platematch::{
    Color, DetectorParams, GalleryOrder, Interpolation, OverlayStyle, PipelineConfig, Rect,
    DEFAULT_MATCH_THRESHOLD, UNMATCHED_LABEL,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryOrderConfig {
    #[default]
    Lexicographic,
    Enumeration,
}

impl From<GalleryOrderConfig> for GalleryOrder {
    fn from(value: GalleryOrderConfig) -> Self {
        match value {
            GalleryOrderConfig::Lexicographic => GalleryOrder::Lexicographic,
            GalleryOrderConfig::Enumeration => GalleryOrder::Enumeration,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationConfig {
    Nearest,
    #[default]
    Bilinear,
}

impl From<InterpolationConfig> for Interpolation {
    fn from(value: InterpolationConfig) -> Self {
        match value {
            InterpolationConfig::Nearest => Interpolation::Nearest,
            InterpolationConfig::Bilinear => Interpolation::Bilinear,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputJson {
    pub kind: InputKind,
    pub path: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    #[default]
    Cascade,
    Fixed,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorJson {
    pub kind: DetectorKind,
    pub classifier_path: PathBuf,
    pub regions: Vec<[i32; 4]>,
    pub scale_factor: f64,
    pub min_neighbors: u32,
    pub min_size: [u32; 2],
}

impl Default for DetectorJson {
    fn default() -> Self {
        let params = DetectorParams::default();
        Self {
            kind: DetectorKind::Cascade,
            classifier_path: PathBuf::from("haarcascade_russian_plate_number.xml"),
            regions: Vec::new(),
            scale_factor: params.scale_factor,
            min_neighbors: params.min_neighbors,
            min_size: [params.min_size.0, params.min_size.1],
        }
    }
}

impl DetectorJson {
    pub fn params(&self) -> DetectorParams {
        DetectorParams {
            scale_factor: self.scale_factor,
            min_neighbors: self.min_neighbors,
            min_size: (self.min_size[0], self.min_size[1]),
        }
    }

    pub fn fixed_regions(&self) -> Vec<Rect> {
        self.regions
            .iter()
            .map(|&[x, y, width, height]| Rect::new(x, y, width, height))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OverlayJson {
    matched_color: Color,
    unmatched_color: Color,
    overlay_alpha: f32,
    text_color: Color,
    line_thickness: u32,
    font_path: Option<PathBuf>,
    font_scale: f32,
    label_offset: i32,
    unmatched_label: String,
}

impl Default for OverlayJson {
    fn default() -> Self {
        let style = OverlayStyle::default();
        Self {
            matched_color: style.matched_color,
            unmatched_color: style.unmatched_color,
            overlay_alpha: style.overlay_alpha,
            text_color: style.text_color,
            line_thickness: style.line_thickness,
            font_path: style.font_path,
            font_scale: style.font_scale,
            label_offset: style.label_offset,
            unmatched_label: UNMATCHED_LABEL.to_string(),
        }
    }
}

impl From<OverlayJson> for OverlayStyle {
    fn from(value: OverlayJson) -> Self {
        Self {
            matched_color: value.matched_color,
            unmatched_color: value.unmatched_color,
            overlay_alpha: value.overlay_alpha,
            text_color: value.text_color,
            line_thickness: value.line_thickness,
            font_path: value.font_path,
            font_scale: value.font_scale,
            label_offset: value.label_offset,
            unmatched_label: value.unmatched_label,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gallery_dir: String,
    pub gallery_order: GalleryOrderConfig,
    pub input: InputJson,
    pub detector: DetectorJson,
    pub frame_width: Option<u32>,
    pub match_threshold: f32,
    pub interpolation: InterpolationConfig,
    pub overlay: OverlayJson,
    pub output_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub display: bool,
    pub frame_delay_ms: u32,
    pub quit_key: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gallery_dir: String::new(),
            gallery_order: GalleryOrderConfig::default(),
            input: InputJson::default(),
            detector: DetectorJson::default(),
            frame_width: Some(1000),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            interpolation: InterpolationConfig::default(),
            overlay: OverlayJson::default(),
            output_path: None,
            report_path: None,
            display: false,
            frame_delay_ms: 50,
            quit_key: 'q',
        }
    }
}

impl Config {
    /// Splits off the library pipeline configuration.
    pub fn pipeline_config(&mut self) -> PipelineConfig {
        PipelineConfig {
            match_threshold: self.match_threshold,
            detector: self.detector.params(),
            interpolation: self.interpolation.into(),
            overlay: std::mem::take(&mut self.overlay).into(),
        }
    }
}
