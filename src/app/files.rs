use super::*;

impl QuizApp {
    /// Une la selección nueva con la lista actual. Un nombre repetido se queda
    /// en su posición pero con el fichero más reciente.
    pub fn add_files(&mut self, selection: Vec<UploadedFile>) {
        for file in selection {
            match self.files.iter_mut().find(|f| f.name == file.name) {
                Some(existing) => {
                    log::debug!("Replacing previously selected {}", file.name);
                    *existing = file;
                }
                None => self.files.push(file),
            }
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            let removed = self.files.remove(index);
            log::debug!("Removed {}", removed.name);
        }
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    /// Abre el selector de PDFs del sistema.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn pick_files(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_files()
        else {
            return;
        };

        let mut selection = Vec::new();
        for path in paths {
            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().into_owned(),
                None => continue,
            };
            match std::fs::read(&path) {
                Ok(bytes) => selection.push(UploadedFile::new(name, bytes)),
                Err(err) => log::warn!("Could not read {}: {err}", path.display()),
            }
        }
        self.add_files(selection);
    }

    /// En el navegador la lectura es asíncrona; `poll_pending` recoge el resultado.
    #[cfg(target_arch = "wasm32")]
    pub fn pick_files(&mut self) {
        let (tx, rx) = std::sync::mpsc::channel::<Vec<UploadedFile>>();
        self.picked_rx = Some(rx);

        wasm_bindgen_futures::spawn_local(async move {
            let Some(handles) = rfd::AsyncFileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_files()
                .await
            else {
                return;
            };

            let mut selection = Vec::with_capacity(handles.len());
            for handle in handles {
                let bytes = handle.read().await;
                selection.push(UploadedFile::new(handle.file_name(), bytes));
            }
            let _ = tx.send(selection);
        });
    }

    pub(crate) fn poll_picked_files(&mut self) {
        let Some(rx) = self.picked_rx.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(selection) => {
                self.picked_rx = None;
                self.add_files(selection);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {}
            Err(std::sync::mpsc::TryRecvError::Disconnected) => self.picked_rx = None,
        }
    }
}
