//! Per-compilation document registry

use crate::config::OpenApiConfig;
use crate::error::{OpenApiError, OpenApiResult};
use crate::route::HttpMethod;
use crate::security::CompiledSecurity;
use crate::specification::{
    ApiInfo, Components, OpenApiSpec, Operation, PathItem, SecurityScheme, Server, Tag,
};
use schemars::gen::{SchemaGenerator, SchemaSettings};
use std::collections::BTreeMap;
use tracing::debug;

/// Everything one compilation pass collects before the document is assembled.
///
/// A registry is created for a single `generate` call and consumed by
/// [`DocumentRegistry::into_spec`], so compiling twice never shares state.
pub struct DocumentRegistry {
    generator: SchemaGenerator,
    paths: BTreeMap<String, PathItem>,
    security_schemes: BTreeMap<String, SecurityScheme>,
    tags: Vec<String>,
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self {
            generator: SchemaSettings::openapi3().into_generator(),
            paths: BTreeMap::new(),
            security_schemes: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Generator shared by every schema of this pass; named types end up in
    /// `components.schemas`
    pub fn schema_generator(&mut self) -> &mut SchemaGenerator {
        &mut self.generator
    }

    /// Register a compiled scheme. A later scheme under the same name replaces
    /// the earlier one.
    pub fn register_security(&mut self, compiled: CompiledSecurity) {
        if let Some(previous) = self.security_schemes.get(&compiled.name) {
            if *previous != compiled.scheme {
                debug!(scheme = %compiled.name, "Replacing security scheme registered under the same name");
            }
        }
        self.security_schemes.insert(compiled.name, compiled.scheme);
    }

    /// Add an operation. A second operation for the same path and method is rejected.
    pub fn register_operation(
        &mut self,
        path: String,
        method: HttpMethod,
        operation: Operation,
    ) -> OpenApiResult<()> {
        let item = self.paths.entry(path.clone()).or_default();
        let slot = item.operation_slot(method);
        if slot.is_some() {
            return Err(OpenApiError::duplicate_operation(method, path));
        }

        for tag in &operation.tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        debug!(%method, %path, "Registered operation");
        *slot = Some(operation);
        Ok(())
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(PathItem::len).sum()
    }

    /// Assemble the final document from the collected operations and the caller's metadata
    pub fn into_spec(mut self, config: &OpenApiConfig) -> OpenApiSpec {
        let components = Components {
            schemas: self.generator.take_definitions().into_iter().collect(),
            security_schemes: self.security_schemes,
        };

        OpenApiSpec {
            openapi: config.openapi_version.clone(),
            info: ApiInfo {
                title: config.title.clone(),
                description: config.description.clone(),
                version: config.version.clone(),
            },
            servers: config
                .servers
                .iter()
                .map(|server| Server {
                    url: server.url.clone(),
                    description: server.description.clone(),
                })
                .collect(),
            paths: self.paths,
            components: (!components.is_empty()).then_some(components),
            tags: self
                .tags
                .into_iter()
                .map(|name| Tag {
                    name,
                    description: None,
                })
                .collect(),
        }
    }
}
