use std::env;
use std::path::{Path, PathBuf};

/// Characters ranked by overall word count. Controls series order and which
/// series are visible when the chart opens.
pub const CHARACTERS: [&str; 24] = [
    "Michael",
    "Dwight",
    "Jim",
    "Pam",
    "Andy",
    "Angela",
    "Kevin",
    "Ryan",
    "Erin",
    "Oscar",
    "Darryl",
    "Kelly",
    "Jan",
    "Toby",
    "Phyllis",
    "Nellie",
    "Stanley",
    "Gabe",
    "Robert",
    "Holly",
    "Meredith",
    "Creed",
    "David Wallace",
    "Todd Packer",
];

pub const DEFAULT_VISIBLE_COUNT: usize = 5;
pub const CHART_FILE_STEM: &str = "the_office_area_plot_web";

/// Every path and knob the two phases read. Nothing else is global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_path: PathBuf,
    pub preprocess_output_path: PathBuf,
    pub speaker_output_path: PathBuf,
    pub chart_output_path: PathBuf,
    pub character_rank_list: Vec<String>,
    pub default_visible_count: usize,
}

impl Config {
    /// The standard layout under `root`: `data/` for input, `output/` for
    /// everything written.
    pub fn from_root(root: &Path) -> Self {
        let output = root.join("output");
        Config {
            input_path: root.join("data").join("the_office_lines.csv"),
            preprocess_output_path: output.join("word_tok.csv"),
            speaker_output_path: output.join("word_tok_speaker.csv"),
            chart_output_path: output.join(format!("{}.html", CHART_FILE_STEM)),
            character_rank_list: CHARACTERS.iter().map(|s| s.to_string()).collect(),
            default_visible_count: DEFAULT_VISIBLE_COUNT,
        }
    }

    /// Points all three outputs into `dir`, keeping their file names.
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        for path in [
            &mut self.preprocess_output_path,
            &mut self.speaker_output_path,
            &mut self.chart_output_path,
        ] {
            if let Some(name) = path.file_name().map(|n| n.to_os_string()) {
                *path = dir.join(name);
            }
        }
        self
    }
}

/// Directory of the running program, from `argv[0]`, made absolute against
/// the working directory. Falls back to the working directory itself.
pub fn program_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let dir = env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    if dir.is_absolute() {
        dir
    } else {
        cwd.join(dir)
    }
}
