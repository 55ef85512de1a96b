//! A _section_ is a subdivision of a project that groups tasks together. It
//! is either a header above a list of tasks in a list view or a column in a
//! board view of a project.

use std::fmt::Display;

use serde_json::Value;

use super::segment;
use crate::error::Result;
use crate::transport::{Params, RequestOptions, Transport};

/// Wrapper for the sections endpoints.
///
/// Holds nothing but a borrowed transport; every call is built from its
/// arguments alone and the transport's answer is returned as-is.
pub struct Sections<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Sections<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Creates a new section in a project.
    ///
    /// Returns the full record of the newly created section.
    pub fn create_in_project(
        &self,
        project: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/projects/{}/sections", segment(project));
        self.transport.post(&path, params, options)
    }

    /// Returns the compact records for all sections in the specified project.
    pub fn list_by_project(
        &self,
        project: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/projects/{}/sections", segment(project));
        self.transport.get(&path, params, options)
    }

    /// Returns the complete record for a single section.
    pub fn get_by_id(
        &self,
        section: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/sections/{}", segment(section));
        self.transport.get(&path, params, options)
    }

    /// Updates a section. Only the fields present in `params` change; all
    /// others keep their current value on the server.
    ///
    /// Send only the fields you mean to change, or you may overwrite edits
    /// another user made since you last read the section.
    ///
    /// Returns the complete updated section record.
    pub fn update(
        &self,
        section: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/sections/{}", segment(section));
        self.transport.put(&path, params, options)
    }

    /// Deletes a section. Sections must be empty to be deleted, and the last
    /// remaining section in a board view cannot be deleted.
    ///
    /// Returns an empty data block.
    pub fn delete(
        &self,
        section: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/sections/{}", segment(section));
        self.transport.delete(&path, params, options)
    }

    /// Moves sections relative to each other in a board view. One of
    /// `before_section` or `after_section` should be given, otherwise the
    /// service treats the request as a no-op.
    ///
    /// Moving sections is not supported in list views.
    ///
    /// Returns an empty data block.
    pub fn insert_in_project(
        &self,
        project: impl Display,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let path = format!("/projects/{}/sections/insert", segment(project));
        self.transport.post(&path, params, options)
    }
}
