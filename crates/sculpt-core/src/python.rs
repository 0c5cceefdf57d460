//! Python bindings: a `Session` class over one tracked Java source.

use std::path::PathBuf;

use parking_lot::Mutex;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::config::SculptConfig;
use crate::locate::Granularity;
use crate::models::{ChangeRequest, CommitRequest, CommitStatus, Location, ProgramUnit, UnitKind};
use crate::pipeline::{Capabilities, LocalPublisher, Publisher};
use crate::session::Session;
use crate::source::Source;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_py_json<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<PyObject> {
    let json_str = serde_json::to_string(value)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
    let json_module = py.import("json")?;
    json_module
        .call_method1("loads", (json_str,))
        .map(|o| o.into())
}

fn unit_kind(raw: &str) -> PyResult<UnitKind> {
    UnitKind::parse(raw).ok_or_else(|| PyValueError::new_err(format!("Unknown unit kind: {raw}")))
}

#[derive(Serialize)]
struct CommitSummary<'a> {
    id: &'a str,
    description: &'a str,
    version: u32,
}

impl<'a> From<&'a CommitRequest> for CommitSummary<'a> {
    fn from(request: &'a CommitRequest) -> Self {
        Self {
            id: &request.id,
            description: &request.description,
            version: request.version,
        }
    }
}

/// Publishes through a Python callable `(id, description, text) -> (ok, message)`.
/// A raised exception counts as an aborted publish.
struct CallablePublisher<'py> {
    callback: Bound<'py, PyAny>,
}

impl Publisher for CallablePublisher<'_> {
    fn publish(&mut self, request: &CommitRequest) -> CommitStatus {
        let outcome = self
            .callback
            .call1((
                request.id.as_str(),
                request.description.as_str(),
                request.text(),
            ))
            .and_then(|result| result.extract::<(bool, String)>());
        match outcome {
            Ok((true, message)) => CommitStatus::Ok(message),
            Ok((false, message)) => CommitStatus::Aborted(message),
            Err(err) => CommitStatus::Aborted(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[pyclass(name = "Session")]
pub struct PySession {
    inner: Mutex<Session>,
}

impl PySession {
    fn selection(session: &Session, start: usize, end: usize) -> PyResult<Location> {
        Ok(session.current().location(start, end)?)
    }
}

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (name, text, config_path=None))]
    pub fn new(name: &str, text: &str, config_path: Option<PathBuf>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => SculptConfig::load(&path)?,
            None => SculptConfig::from_env()?,
        };
        let session =
            Session::with_capabilities(Source::new(name, text), Capabilities::new(config))?;
        Ok(Self {
            inner: Mutex::new(session),
        })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    #[getter]
    fn text(&self) -> String {
        self.inner.lock().current().content().to_string()
    }

    #[getter]
    fn version(&self) -> u32 {
        self.inner.lock().current().version()
    }

    fn locate(&self, py: Python<'_>, kind: &str, name: &str) -> PyResult<PyObject> {
        let unit = ProgramUnit::new(unit_kind(kind)?, name);
        let found = self.inner.lock().locate(&unit)?;
        to_py_json(py, &found)
    }

    #[pyo3(signature = (start, end, whole_unit=false))]
    fn is_valid_selection(&self, start: usize, end: usize, whole_unit: bool) -> PyResult<bool> {
        let granularity = if whole_unit {
            Granularity::WholeUnit
        } else {
            Granularity::Statements
        };
        let mut session = self.inner.lock();
        let location = Self::selection(&session, start, end)?;
        Ok(session.validate_selection(&location, granularity)?.valid)
    }

    fn issues(&self, py: Python<'_>) -> PyResult<PyObject> {
        let issues = self.inner.lock().issues()?;
        to_py_json(py, &issues)
    }

    fn recommend_imports(&self) -> PyResult<Vec<String>> {
        let imports = self.inner.lock().recommend_imports()?;
        Ok(imports.into_iter().collect())
    }

    fn rename(
        &self,
        py: Python<'_>,
        kind: &str,
        start: usize,
        end: usize,
        new_name: &str,
    ) -> PyResult<PyObject> {
        let kind = unit_kind(kind)?;
        let mut session = self.inner.lock();
        let selection = Self::selection(&session, start, end)?;
        let request = match kind {
            UnitKind::Class => ChangeRequest::rename_class(selection, new_name),
            UnitKind::Method => ChangeRequest::rename_method(selection, new_name),
            UnitKind::Field => ChangeRequest::rename_field(selection, new_name),
            UnitKind::Parameter => ChangeRequest::rename_parameter(selection, new_name),
        };
        let committed = session.apply(request)?;
        to_py_json(py, &CommitSummary::from(&committed))
    }

    fn delete(&self, py: Python<'_>, kind: &str, start: usize, end: usize) -> PyResult<PyObject> {
        let kind = unit_kind(kind)?;
        let mut session = self.inner.lock();
        let selection = Self::selection(&session, start, end)?;
        let request = match kind {
            UnitKind::Class => ChangeRequest::delete_class(selection),
            UnitKind::Method => ChangeRequest::delete_method(selection),
            UnitKind::Field => ChangeRequest::delete_field(selection),
            UnitKind::Parameter => ChangeRequest::delete_parameter(selection),
        };
        let committed = session.apply(request)?;
        to_py_json(py, &CommitSummary::from(&committed))
    }

    fn reformat(&self, py: Python<'_>) -> PyResult<PyObject> {
        let mut session = self.inner.lock();
        let request = ChangeRequest::reformat(session.current());
        let committed = session.apply(request)?;
        to_py_json(py, &CommitSummary::from(&committed))
    }

    fn optimize_imports(&self, py: Python<'_>) -> PyResult<PyObject> {
        let mut session = self.inner.lock();
        let request = ChangeRequest::optimize_imports(session.current());
        let committed = session.apply(request)?;
        to_py_json(py, &CommitSummary::from(&committed))
    }

    /// Commit one valid recommended change at a time until none is left.
    fn fix(&self, py: Python<'_>) -> PyResult<PyObject> {
        let mut session = self.inner.lock();
        let limit = session.issues()?.len();
        let mut committed = Vec::new();
        for _ in 0..limit {
            let Some(change) = session
                .recommend_changes()?
                .into_iter()
                .find(|c| c.is_valid())
            else {
                break;
            };
            committed.push(session.commit(&change)?);
        }
        let summaries: Vec<CommitSummary<'_>> = committed.iter().map(CommitSummary::from).collect();
        to_py_json(py, &summaries)
    }

    fn pending(&self) -> Vec<String> {
        self.inner.lock().pending().ids()
    }

    #[pyo3(signature = (callback=None))]
    fn publish(&self, py: Python<'_>, callback: Option<Bound<'_, PyAny>>) -> PyResult<PyObject> {
        let mut session = self.inner.lock();
        let report = match callback {
            Some(callback) => session.publish(&mut CallablePublisher { callback }),
            None => session.publish(&mut LocalPublisher::new()),
        };
        to_py_json(py, &report)
    }

    #[pyo3(signature = (version=None))]
    fn reset(&self, version: Option<u32>) -> PyResult<u32> {
        let mut session = self.inner.lock();
        Ok(session.reset(version)?.version())
    }
}
