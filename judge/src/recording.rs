use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use rota::BoardSnapshot;
use serde::{Deserialize, Serialize};

/// Writes every finished round into its own JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    snapshots: Vec<BoardSnapshot>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            snapshots: Vec::new(),
        })
    }

    pub fn store_snapshot(&mut self, snapshot: &BoardSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    /// Writes the snapshots stored since the last call, and starts a new recording.
    pub fn write_round_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("round_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = RoundRecording {
            snapshots: std::mem::take(&mut self.snapshots),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct RoundRecording {
    pub snapshots: Vec<BoardSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_rejected() {
        assert!(Recorder::new(PathBuf::from("/this/directory/does/not/exist")).is_err());
    }

    #[test]
    fn rounds_go_into_numbered_files() {
        let dir = std::env::temp_dir().join(format!("rota_recorder_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut recorder = Recorder::new(dir.clone()).unwrap();
        let snapshot = BoardSnapshot {
            board: "c---p----".parse().unwrap(),
            player_wins: 0,
            computer_wins: 0,
            moves_this_round: 1,
            hash: None,
        };
        recorder.store_snapshot(&snapshot);
        let first = recorder.write_round_recording().unwrap();
        let second = recorder.write_round_recording().unwrap();
        assert_eq!(first.file_name().unwrap(), "round_000001.json");
        assert_eq!(second.file_name().unwrap(), "round_000002.json");

        let recording: RoundRecording =
            serde_json::from_reader(File::open(&first).unwrap()).unwrap();
        assert_eq!(recording.snapshots, vec![snapshot]);
        let recording: RoundRecording =
            serde_json::from_reader(File::open(&second).unwrap()).unwrap();
        assert!(recording.snapshots.is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
