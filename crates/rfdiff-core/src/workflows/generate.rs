use crate::client::error::ClientError;
use crate::client::progress::{Progress, ProgressReporter};
use crate::client::{GenerationService, StructureSource};
use crate::core::params::GenerationParams;
use crate::core::payload::{
    GenerationRequest, GenerationResponse, RESPONSE_PREVIEW_CHARS, ServiceResponse,
};
use crate::core::structure::{self, DEFAULT_MAX_ATOM_RECORDS, StructureId};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const DEFAULT_OUTPUT_FILE: &str = "output.pdb";

/// Everything needed for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub structure_id: StructureId,
    /// Directory holding the local structure file.
    pub work_dir: PathBuf,
    pub output_path: PathBuf,
    pub max_atom_records: usize,
    pub params: GenerationParams,
}

impl GenerationJob {
    pub fn structure_path(&self) -> PathBuf {
        self.work_dir.join(self.structure_id.file_name())
    }
}

impl Default for GenerationJob {
    fn default() -> Self {
        Self {
            structure_id: StructureId::default(),
            work_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_atom_records: DEFAULT_MAX_ATOM_RECORDS,
            params: GenerationParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStructure {
    pub path: PathBuf,
    /// `false` when the file was already present and no request was made.
    pub downloaded: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub structure: LocalStructure,
    pub submitted_records: usize,
    pub response: ServiceResponse,
    pub output_path: PathBuf,
}

/// Makes sure the structure file for `id` exists in `work_dir`, downloading it if absent.
///
/// An existing file is left untouched and no network request is made.
pub async fn ensure_local_structure(
    source: &(impl StructureSource + ?Sized),
    id: &StructureId,
    work_dir: &Path,
    reporter: &ProgressReporter<'_>,
) -> Result<LocalStructure, ClientError> {
    let path = work_dir.join(id.file_name());
    if path.exists() {
        debug!("Structure file {:?} already present; skipping download.", path);
        reporter.report(Progress::Message(format!(
            "Using existing structure file {}",
            path.display()
        )));
        return Ok(LocalStructure {
            path,
            downloaded: false,
        });
    }

    download_structure(source, id, &path, reporter).await?;
    Ok(LocalStructure {
        path,
        downloaded: true,
    })
}

/// Downloads the structure file for `id` and writes the body to `path` verbatim,
/// overwriting any existing file.
pub async fn download_structure(
    source: &(impl StructureSource + ?Sized),
    id: &StructureId,
    path: &Path,
    reporter: &ProgressReporter<'_>,
) -> Result<(), ClientError> {
    let contents = source.fetch(id, reporter).await?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ClientError::io(parent))?;
    }
    fs::write(path, &contents).map_err(ClientError::io(path))?;
    info!("Saved structure {} to {:?} ({} bytes)", id, path, contents.len());
    Ok(())
}

/// Reads the structure file and keeps at most `max_records` of its `ATOM` lines.
pub fn extract_truncated_records(path: &Path, max_records: usize) -> Result<String, ClientError> {
    let content = fs::read_to_string(path).map_err(ClientError::io(path))?;
    let records = structure::extract_atom_records(&content, max_records);
    debug!(
        "Extracted {} ATOM record(s) from {:?} (limit {})",
        structure::record_count(&records),
        path,
        max_records
    );
    Ok(records)
}

/// Sends one generation request and returns the raw response.
pub async fn submit_generation_request(
    service: &(impl GenerationService + ?Sized),
    input_pdb: String,
    params: &GenerationParams,
) -> Result<ServiceResponse, ClientError> {
    let request = GenerationRequest::new(input_pdb, params.clone());
    service.generate(&request).await
}

/// Reports the response preview, then writes the generated structure to `path`.
///
/// The body must be JSON with an `output_pdb` string. If it is not, nothing is written.
pub fn persist_output(
    response: &ServiceResponse,
    path: &Path,
    reporter: &ProgressReporter<'_>,
) -> Result<GenerationResponse, ClientError> {
    reporter.report(Progress::ResponseReceived {
        status: response.to_string(),
        preview: response.preview(RESPONSE_PREVIEW_CHARS).to_string(),
    });

    let generated = response.parse().map_err(ClientError::MalformedResponse)?;
    fs::write(path, &generated.output_pdb).map_err(ClientError::io(path))?;
    info!(
        "Wrote generated structure to {:?} ({} bytes)",
        path,
        generated.output_pdb.len()
    );
    Ok(generated)
}

/// Runs the full fetch, extract, submit and persist pipeline.
#[instrument(skip_all, name = "generation_workflow", fields(structure = %job.structure_id))]
pub async fn run(
    job: &GenerationJob,
    source: &(impl StructureSource + ?Sized),
    service: &(impl GenerationService + ?Sized),
    reporter: &ProgressReporter<'_>,
) -> Result<GenerationOutcome, ClientError> {
    // === Step 1: Local structure file ===
    reporter.report(Progress::PhaseStart {
        name: "Fetching structure",
    });
    let structure =
        ensure_local_structure(source, &job.structure_id, &job.work_dir, reporter).await?;
    reporter.report(Progress::PhaseFinish);

    // === Step 2: Truncated ATOM records ===
    let input_pdb = extract_truncated_records(&structure.path, job.max_atom_records)?;
    let submitted_records = structure::record_count(&input_pdb);
    info!(
        "Prepared {} ATOM record(s) from {:?}",
        submitted_records, structure.path
    );

    // === Step 3: Generation request ===
    reporter.report(Progress::PhaseStart {
        name: "Generating structure",
    });
    let response = submit_generation_request(service, input_pdb, &job.params).await?;
    reporter.report(Progress::PhaseFinish);

    // === Step 4: Output ===
    persist_output(&response, &job.output_path, reporter)?;

    Ok(GenerationOutcome {
        structure,
        submitted_records,
        response,
        output_path: job.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct CountingSource {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StructureSource for CountingSource {
        async fn fetch(
            &self,
            _id: &StructureId,
            _reporter: &ProgressReporter<'_>,
        ) -> Result<Vec<u8>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    struct EchoService {
        body: &'static str,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl GenerationService for EchoService {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<ServiceResponse, ClientError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(ServiceResponse::new(200, Some("OK".to_string()), self.body))
        }
    }

    fn source(body: &'static str) -> CountingSource {
        CountingSource {
            body,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn existing_structure_file_is_not_downloaded_again() {
        let dir = tempdir().unwrap();
        let id = StructureId::default();
        let path = dir.path().join(id.file_name());
        fs::write(&path, "ATOM local copy").unwrap();

        let source = source("ATOM remote copy");
        let local = ensure_local_structure(&source, &id, dir.path(), &ProgressReporter::new())
            .await
            .unwrap();

        assert!(!local.downloaded);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "ATOM local copy");
    }

    #[tokio::test]
    async fn skipped_download_reports_existing_file() {
        let dir = tempdir().unwrap();
        let id = StructureId::default();
        let path = dir.path().join(id.file_name());
        fs::write(&path, "ATOM local copy").unwrap();

        let events = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            sink.lock().unwrap().push(p);
        }));

        let source = source("ATOM remote copy");
        ensure_local_structure(&source, &id, dir.path(), &reporter)
            .await
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![Progress::Message(format!(
                "Using existing structure file {}",
                path.display()
            ))]
        );
    }

    #[tokio::test]
    async fn missing_structure_file_is_downloaded_verbatim() {
        let dir = tempdir().unwrap();
        let id = StructureId::default();

        let source = source("HEADER\nATOM remote copy\n");
        let local = ensure_local_structure(&source, &id, dir.path(), &ProgressReporter::new())
            .await
            .unwrap();

        assert!(local.downloaded);
        assert_eq!(local.path, dir.path().join("1R42.pdb"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            fs::read_to_string(&local.path).unwrap(),
            "HEADER\nATOM remote copy\n"
        );
    }

    #[tokio::test]
    async fn run_persists_output_and_reports_preview_first() {
        let dir = tempdir().unwrap();
        let job = GenerationJob {
            work_dir: dir.path().to_path_buf(),
            output_path: dir.path().join("output.pdb"),
            ..GenerationJob::default()
        };

        let source = source("ATOM 1\nHETATM 2\nATOM 3\n");
        let service = EchoService {
            body: r#"{"output_pdb": "MOCKDATA"}"#,
            seen: Mutex::new(Vec::new()),
        };

        let events = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            sink.lock().unwrap().push(p);
        }));

        let outcome = run(&job, &source, &service, &reporter).await.unwrap();

        assert_eq!(outcome.submitted_records, 2);
        assert_eq!(fs::read_to_string(&job.output_path).unwrap(), "MOCKDATA");

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].input_pdb, "ATOM 1\nATOM 3");
        assert_eq!(seen[0].params, GenerationParams::default());

        let events = events.lock().unwrap();
        assert!(events.contains(&Progress::ResponseReceived {
            status: "<Response [200]>".to_string(),
            preview: r#"{"output_pdb": "MOCKDATA"}"#.to_string(),
        }));
    }

    #[test]
    fn malformed_response_leaves_output_unwritten() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.pdb");
        let response = ServiceResponse::new(500, None, "Internal Server Error");

        let result = persist_output(&response, &output, &ProgressReporter::new());

        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
        assert!(!output.exists());
    }

    #[test]
    fn persist_overwrites_existing_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.pdb");
        fs::write(&output, "stale").unwrap();
        let response = ServiceResponse::new(200, None, r#"{"output_pdb": "fresh"}"#);

        persist_output(&response, &output, &ProgressReporter::new()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "fresh");
    }

    #[test]
    fn missing_structure_file_surfaces_io_error_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.pdb");
        let err = extract_truncated_records(&path, DEFAULT_MAX_ATOM_RECORDS).unwrap_err();
        assert!(matches!(err, ClientError::Io { path: p, .. } if p == path));
    }
}
