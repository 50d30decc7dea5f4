//! Multipart form reading

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::app::UploadedFile;
use crate::error::AppError;

/// A fully buffered multipart body: text fields by name, files in arrival order
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field.bytes().await?;
                    form.files.push((name, UploadedFile::new(filename, bytes.to_vec())));
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Text field value, if sent
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// All files sent under `name`
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(field, _)| field == name);
        self.files = rest;
        matching.into_iter().map(|(_, file)| file).collect()
    }

    /// First file sent under `name`
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.take_files(name).into_iter().next()
    }
}
