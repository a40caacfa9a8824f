// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Network instance loader for router and user tables.
//!
//! Routers and users arrive as two comma-separated tables with a header row:
//!
//! ```raw
//! id,x,y,cost,coverage,capacity
//! 1,10,20,10000,5,2
//! ...
//! ```
//!
//! ```raw
//! id,x,y
//! 1,11,19
//! ...
//! ```
//!
//! Rows are deserialized into `RouterRecord` / `UserRecord` with `csv` and
//! `serde`, kept in file order, and handed to `NetworkModelBuilder`, so every
//! contract check of the model (negative values, duplicate ids) applies to
//! loaded data as well. Missing fields, extra fields and tokens that are not
//! integers of the requested type (including `NaN` or `1.5`) surface as
//! `LoaderError::Csv` with the offending record position.

use crate::model::{ModelError, NetworkModel, NetworkModelBuilder, RouterRecord, UserRecord};
use serde::de::DeserializeOwned;
use std::{fs::File, io::Read, path::Path};
use wifiplan_core::num::PlanNumeric;

/// The error type for the loading process.
#[derive(Debug)]
pub enum LoaderError<T> {
    /// An I/O error occurred while opening an input file.
    Io(std::io::Error),
    /// A table could not be read or a row could not be deserialized.
    Csv(csv::Error),
    /// The records were read but violate the model contract.
    Model(ModelError<T>),
}

impl<T> std::fmt::Display for LoaderError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::Model(e) => write!(f, "Invalid network: {e}"),
        }
    }
}

impl<T> std::error::Error for LoaderError<T>
where
    T: std::fmt::Debug + std::fmt::Display,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Model(_) => None,
        }
    }
}

impl<T> From<std::io::Error> for LoaderError<T> {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl<T> From<csv::Error> for LoaderError<T> {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl<T> From<ModelError<T>> for LoaderError<T> {
    fn from(e: ModelError<T>) -> Self {
        Self::Model(e)
    }
}

/// A configurable loader for router and user tables.
///
/// # Configuration
/// * `has_headers`: Whether the first row of each table is a header (default `true`).
///   Without headers, columns are matched by position.
/// * `delimiter`: The field delimiter (default `b','`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLoader {
    has_headers: bool,
    delimiter: u8,
}

impl Default for NetworkLoader {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
        }
    }
}

impl NetworkLoader {
    /// Creates a new `NetworkLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the tables start with a header row.
    #[inline]
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Sets the field delimiter.
    #[inline]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn csv_reader<R: Read>(&self, rdr: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(rdr)
    }

    /// Reads router records from a table, in file order.
    pub fn read_routers<T, R>(&self, rdr: R) -> Result<Vec<RouterRecord<T>>, LoaderError<T>>
    where
        T: PlanNumeric + DeserializeOwned,
        R: Read,
    {
        let mut reader = self.csv_reader(rdr);
        let mut routers = Vec::new();
        for row in reader.deserialize::<RouterRecord<T>>() {
            routers.push(row?);
        }
        Ok(routers)
    }

    /// Reads user records from a table, in file order.
    pub fn read_users<T, R>(&self, rdr: R) -> Result<Vec<UserRecord<T>>, LoaderError<T>>
    where
        T: PlanNumeric + DeserializeOwned,
        R: Read,
    {
        let mut reader = self.csv_reader(rdr);
        let mut users = Vec::new();
        for row in reader.deserialize::<UserRecord<T>>() {
            users.push(row?);
        }
        Ok(users)
    }

    /// Loads and validates a model from two generic readers.
    pub fn from_readers<T, R, U>(&self, routers: R, users: U) -> Result<NetworkModel<T>, LoaderError<T>>
    where
        T: PlanNumeric + DeserializeOwned,
        R: Read,
        U: Read,
    {
        let routers = self.read_routers(routers)?;
        let users = self.read_users(users)?;

        let mut builder = NetworkModelBuilder::with_capacity(routers.len(), users.len());
        builder.add_routers(routers).add_users(users);
        Ok(builder.build()?)
    }

    /// Loads and validates a model from two file paths.
    #[inline]
    pub fn from_paths<T, P, Q>(&self, routers: P, users: Q) -> Result<NetworkModel<T>, LoaderError<T>>
    where
        T: PlanNumeric + DeserializeOwned,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let routers = File::open(routers)?;
        let users = File::open(users)?;
        self.from_readers(routers, users)
    }

    /// Loads and validates a model from two string slices.
    #[inline]
    pub fn from_strs<T>(&self, routers: &str, users: &str) -> Result<NetworkModel<T>, LoaderError<T>>
    where
        T: PlanNumeric + DeserializeOwned,
    {
        self.from_readers(routers.as_bytes(), users.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{RouterIndex, UserIndex};

    const ROUTERS: &str = "id,x,y,cost,coverage,capacity\n\
                           1, 10, 20, 10000, 5, 2\n\
                           2, 30, 40, 15000, 10, 2\n\
                           3, 50, 60, 20000, 15, 2\n";

    const USERS: &str = "id,x,y\n100,11,21\n101,31,41\n";

    #[test]
    fn test_loads_and_maps_correctly() {
        let loader = NetworkLoader::new();
        let model: NetworkModel<i64> = loader.from_strs(ROUTERS, USERS).expect("Failed to load");

        assert_eq!(model.num_routers(), 3);
        assert_eq!(model.num_users(), 2);
        assert_eq!(model.router_id(RouterIndex::new(2)), 3);
        assert_eq!(model.router_cost(RouterIndex::new(1)), 15000);
        assert_eq!(model.router_coverage(RouterIndex::new(0)), 5);
        assert_eq!(model.router_capacity(RouterIndex::new(0)), 2);
        assert_eq!(model.user_id(UserIndex::new(1)), 101);
        assert_eq!(model.user_position(UserIndex::new(0)).x(), 11);
    }

    #[test]
    fn test_headerless_tables() {
        let loader = NetworkLoader::new().has_headers(false).delimiter(b';');
        let model: NetworkModel<i32> = loader
            .from_strs("7;0;0;5;3;1\n", "9;1;1\n")
            .expect("Failed to load");
        assert_eq!(model.router_id(RouterIndex::new(0)), 7);
        assert_eq!(model.user_id(UserIndex::new(0)), 9);
    }

    #[test]
    fn test_non_integer_token_is_csv_error() {
        let loader = NetworkLoader::new();
        let res: Result<NetworkModel<i64>, _> =
            loader.from_strs("id,x,y,cost,coverage,capacity\n1,NaN,0,1,1,1\n", "id,x,y\n");
        assert!(matches!(res, Err(LoaderError::Csv(_))));
    }

    #[test]
    fn test_missing_field_is_csv_error() {
        let loader = NetworkLoader::new();
        let res: Result<NetworkModel<i64>, _> =
            loader.from_strs("id,x,y,cost,coverage,capacity\n1,0,0,1,1\n", "id,x,y\n");
        assert!(matches!(res, Err(LoaderError::Csv(_))));
    }

    #[test]
    fn test_contract_violation_is_model_error() {
        let loader = NetworkLoader::new();
        let res: Result<NetworkModel<i64>, _> =
            loader.from_strs(ROUTERS, "id,x,y\n5,0,0\n5,1,1\n");
        match res {
            Err(LoaderError::Model(ModelError::DuplicateUserId { user_index, id })) => {
                assert_eq!(user_index.get(), 1);
                assert_eq!(id, 5);
            }
            other => panic!("Expected DuplicateUserId, got {:?}", other.map(|m| m.num_users())),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = NetworkLoader::new();
        let res: Result<NetworkModel<i64>, _> =
            loader.from_paths("/nonexistent/routers.csv", "/nonexistent/users.csv");
        assert!(matches!(res, Err(LoaderError::Io(_))));
    }

    #[test]
    fn test_from_paths_reads_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let routers = dir.path().join("routers.csv");
        let users = dir.path().join("users.csv");
        std::fs::write(&routers, ROUTERS).expect("write routers");
        std::fs::write(&users, USERS).expect("write users");

        let model: NetworkModel<i64> = NetworkLoader::new()
            .from_paths(&routers, &users)
            .expect("Failed to load");
        assert_eq!(model.num_routers(), 3);
        assert_eq!(model.num_users(), 2);
    }
}
