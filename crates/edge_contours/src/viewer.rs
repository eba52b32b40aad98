//! Display of intermediate stage images.
//!
//! A [`StageViewer`] stands in for an on-screen window system. Windows are
//! held through [`ViewerWindow`], which closes its window when dropped, so a
//! window is released on success, on `?` early returns and while unwinding.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use image::DynamicImage;
use tracing::{debug, info, warn};
use crate::error::{ContourError, Result};

pub trait StageViewer {
    fn open(&mut self, window: &str) -> Result<()>;
    fn show(&mut self, window: &str, image: &DynamicImage) -> Result<()>;
    fn close(&mut self, window: &str) -> Result<()>;
}

/// Scoped handle on an open window
pub struct ViewerWindow<'a, V: StageViewer + ?Sized> {
    viewer: &'a mut V,
    name: String,
}

impl<'a, V: StageViewer + ?Sized> ViewerWindow<'a, V> {
    pub fn open(viewer: &'a mut V, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        viewer.open(&name)?;
        Ok(Self { viewer, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn show(&mut self, image: &DynamicImage) -> Result<()> {
        self.viewer.show(&self.name, image)
    }
}

impl<V: StageViewer + ?Sized> Drop for ViewerWindow<'_, V> {
    fn drop(&mut self) {
        if let Err(e) = self.viewer.close(&self.name) {
            warn!(window = %self.name, "failed to close window: {e}");
        }
    }
}

/// Headless viewer writing every frame to `<dir>/<window>_<seq>.png`
#[derive(Debug)]
pub struct FileViewer {
    dir: PathBuf,
    frames: HashMap<String, usize>,
}

impl FileViewer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            frames: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StageViewer for FileViewer {
    fn open(&mut self, window: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        self.frames.entry(window.to_string()).or_insert(0);
        debug!(window, dir = %self.dir.display(), "opened window");
        Ok(())
    }

    fn show(&mut self, window: &str, image: &DynamicImage) -> Result<()> {
        let seq = self.frames.entry(window.to_string()).or_insert(0);
        let path = self.dir.join(format!("{}_{:02}.png", sanitize(window), *seq));
        *seq += 1;

        image
            .save(&path)
            .map_err(|source| ContourError::ImageSave { path: path.clone(), source })?;
        info!(window, path = %path.display(), "wrote frame");
        Ok(())
    }

    fn close(&mut self, window: &str) -> Result<()> {
        self.frames.remove(window);
        debug!(window, "closed window");
        Ok(())
    }
}

/// Viewer that discards every frame
#[derive(Debug, Clone, Default)]
pub struct NullViewer;

impl StageViewer for NullViewer {
    fn open(&mut self, _window: &str) -> Result<()> {
        Ok(())
    }

    fn show(&mut self, _window: &str, _image: &DynamicImage) -> Result<()> {
        Ok(())
    }

    fn close(&mut self, _window: &str) -> Result<()> {
        Ok(())
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContourError;

    #[derive(Default)]
    struct RecordingViewer {
        events: Vec<String>,
        fail_show: bool,
    }

    impl StageViewer for RecordingViewer {
        fn open(&mut self, window: &str) -> Result<()> {
            self.events.push(format!("open {window}"));
            Ok(())
        }

        fn show(&mut self, window: &str, _image: &DynamicImage) -> Result<()> {
            self.events.push(format!("show {window}"));
            if self.fail_show {
                return Err(ContourError::ImageProcessing("display failed".to_string()));
            }
            Ok(())
        }

        fn close(&mut self, window: &str) -> Result<()> {
            self.events.push(format!("close {window}"));
            Ok(())
        }
    }

    fn show_once(viewer: &mut RecordingViewer) -> Result<()> {
        let mut window = ViewerWindow::open(viewer, "image")?;
        window.show(&DynamicImage::new_luma8(2, 2))?;
        Ok(())
    }

    #[test]
    fn test_window_closed_after_use() {
        let mut viewer = RecordingViewer::default();
        show_once(&mut viewer).expect("Should show");
        assert_eq!(viewer.events, vec!["open image", "show image", "close image"]);
    }

    #[test]
    fn test_window_closed_on_error_path() {
        let mut viewer = RecordingViewer {
            fail_show: true,
            ..Default::default()
        };
        assert!(show_once(&mut viewer).is_err());
        assert_eq!(viewer.events.last().map(String::as_str), Some("close image"));
    }

    #[test]
    fn test_file_viewer_writes_numbered_frames() {
        let dir = std::env::temp_dir().join(format!("edge_contours_viewer_{}", std::process::id()));
        let mut viewer = FileViewer::new(&dir);
        {
            let mut window = ViewerWindow::open(&mut viewer, "closed edges").expect("Should open");
            window.show(&DynamicImage::new_luma8(3, 3)).expect("Should write");
            window.show(&DynamicImage::new_luma8(3, 3)).expect("Should write");
        }

        assert!(dir.join("closed_edges_00.png").exists());
        assert!(dir.join("closed_edges_01.png").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_viewer_save_failure() {
        let dir = std::env::temp_dir()
            .join(format!("edge_contours_missing_{}", std::process::id()))
            .join("not_created");
        let mut viewer = FileViewer::new(&dir);

        let err = viewer
            .show("image", &DynamicImage::new_luma8(3, 3))
            .expect_err("Should fail without an output directory");
        match err {
            ContourError::ImageSave { path, .. } => assert_eq!(path, dir.join("image_00.png")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
