// Copyright 2026 posegraph Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Endpoint Names
//!
//! An endpoint is addressed by an absolute, `/`-separated name such as
//! `/husky/blam_slam/save_graph`. Names are validated once on construction so
//! a proxy never holds a name the service could not possibly resolve.

use std::fmt;
use std::str::FromStr;

use super::error::{PoseGraphError, Result};

/// Validated absolute endpoint name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointName(String);

impl EndpointName {
    /// Parses a full endpoint name. A missing leading `/` is added.
    pub fn new(name: &str) -> Result<Self> {
        let trimmed = name.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(PoseGraphError::InvalidEndpoint(format!(
                "'{}' has no segments",
                name
            )));
        }

        for segment in trimmed.split('/') {
            validate_segment(name, segment)?;
        }

        Ok(Self(format!("/{}", trimmed)))
    }

    /// Joins `base` onto `namespace`. An empty namespace (or `/`) puts the
    /// endpoint at the root.
    pub fn resolve(namespace: &str, base: &str) -> Result<Self> {
        let namespace = namespace.trim_matches('/');
        if namespace.is_empty() {
            return Self::new(base);
        }
        Self::new(&format!("{}/{}", namespace, base.trim_start_matches('/')))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_segment(name: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(PoseGraphError::InvalidEndpoint(format!(
            "'{}' contains an empty segment",
            name
        )));
    }

    if let Some(c) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(PoseGraphError::InvalidEndpoint(format!(
            "'{}' contains invalid character {:?}",
            name, c
        )));
    }

    Ok(())
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EndpointName {
    type Err = PoseGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
