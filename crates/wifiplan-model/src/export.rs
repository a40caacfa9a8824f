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

//! Result tables for a finished plan.
//!
//! Three comma-separated tables are written, one row per record:
//!
//! - selected routers: `id,x,y,cost,coverage,capacity,load`
//! - backbone edges: `from,to,distance` (router ids)
//! - assignments: `user_id,router_id`
//!
//! Writers accept any `io::Write`; `PlanWriter::write_to_dir` creates the
//! files under their conventional names.

use crate::{model::NetworkModel, plan::NetworkPlan};
use serde::Serialize;
use std::{fs::File, io::Write, path::Path};
use wifiplan_core::num::PlanNumeric;

/// File name of the selected-router table.
pub const SELECTED_ROUTERS_FILE: &str = "selected_routers.csv";
/// File name of the backbone-edge table.
pub const BACKBONE_EDGES_FILE: &str = "mst_edges.csv";
/// File name of the assignment table.
pub const ASSIGNMENTS_FILE: &str = "user_assignments.csv";

/// The error type for writing result tables.
#[derive(Debug)]
pub enum ExportError {
    /// An I/O error occurred while creating or flushing an output.
    Io(std::io::Error),
    /// A row could not be serialized.
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

#[derive(Serialize)]
struct SelectedRouterRow<T> {
    id: T,
    x: T,
    y: T,
    cost: T,
    coverage: T,
    capacity: usize,
    load: usize,
}

#[derive(Serialize)]
struct BackboneEdgeRow<T> {
    from: T,
    to: T,
    distance: f64,
}

#[derive(Serialize)]
struct AssignmentRow<T> {
    user_id: T,
    router_id: T,
}

/// Opens a table writer and emits the header row up front, so empty tables
/// still carry their column names.
fn table_writer<W: Write>(w: W, header: &[&str]) -> Result<csv::Writer<W>, ExportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record(header)?;
    Ok(writer)
}

/// Writes the result tables of a plan, resolving indices to identities
/// through the model the plan was computed for.
#[derive(Clone, Copy)]
pub struct PlanWriter<'a, T> {
    model: &'a NetworkModel<T>,
    plan: &'a NetworkPlan<T>,
}

impl<'a, T> PlanWriter<'a, T>
where
    T: PlanNumeric + Serialize,
{
    /// Creates a writer for `plan`.
    ///
    /// # Panics
    ///
    /// Panics if the plan was not computed for a model of this size.
    pub fn new(model: &'a NetworkModel<T>, plan: &'a NetworkPlan<T>) -> Self {
        assert_eq!(
            model.num_routers(),
            plan.selection().num_candidates(),
            "called `PlanWriter::new` with a plan for {} routers but a model with {}",
            plan.selection().num_candidates(),
            model.num_routers()
        );

        Self { model, plan }
    }

    /// Writes one row per selected router, in listing order, with its final load.
    pub fn write_selected_routers<W: Write>(&self, w: W) -> Result<(), ExportError> {
        let mut writer = table_writer(
            w,
            &["id", "x", "y", "cost", "coverage", "capacity", "load"],
        )?;
        let loads = self.plan.assignment();
        for r in self.plan.selection().selected_routers() {
            let position = self.model.router_position(r);
            writer.serialize(SelectedRouterRow {
                id: self.model.router_id(r),
                x: position.x(),
                y: position.y(),
                cost: self.model.router_cost(r),
                coverage: self.model.router_coverage(r),
                capacity: self.model.router_capacity(r),
                load: loads.router_load(r),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes one row per backbone edge, in acceptance order.
    pub fn write_backbone<W: Write>(&self, w: W) -> Result<(), ExportError> {
        let mut writer = table_writer(w, &["from", "to", "distance"])?;
        for edge in self.plan.backbone().edges() {
            writer.serialize(BackboneEdgeRow {
                from: self.model.router_id(edge.from()),
                to: self.model.router_id(edge.to()),
                distance: edge.weight(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes one row per successful assignment, in user processing order.
    pub fn write_assignments<W: Write>(&self, w: W) -> Result<(), ExportError> {
        let mut writer = table_writer(w, &["user_id", "router_id"])?;
        for assignment in self.plan.assignment().assignments() {
            writer.serialize(AssignmentRow {
                user_id: self.model.user_id(assignment.user),
                router_id: self.model.router_id(assignment.router),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes all three tables into `dir` under their conventional file names.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<(), ExportError> {
        let dir = dir.as_ref();
        self.write_selected_routers(File::create(dir.join(SELECTED_ROUTERS_FILE))?)?;
        self.write_backbone(File::create(dir.join(BACKBONE_EDGES_FILE))?)?;
        self.write_assignments(File::create(dir.join(ASSIGNMENTS_FILE))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::{RouterIndex, UserIndex},
        model::{NetworkModelBuilder, RouterRecord, UserRecord},
        plan::{AssignmentPlan, Backbone, BackboneEdge, Selection},
    };
    use fixedbitset::FixedBitSet;

    fn fixture() -> (NetworkModel<i64>, NetworkPlan<i64>) {
        let mut builder = NetworkModelBuilder::<i64>::new();
        builder.add_router(RouterRecord::new(10, 0, 0, 100, 5, 2));
        builder.add_router(RouterRecord::new(20, 9, 9, 100, 5, 2));
        builder.add_router(RouterRecord::new(30, 3, 4, 100, 5, 1));
        builder.add_user(UserRecord::new(7, 1, 1));
        builder.add_user(UserRecord::new(8, 50, 50));
        let model = builder.build().expect("valid model");

        let mut selected = FixedBitSet::with_capacity(3);
        selected.insert(0);
        selected.insert(2);
        let selection = Selection::new(selected, 10, 200);
        let backbone = Backbone::new(vec![BackboneEdge::new(
            RouterIndex::new(0),
            RouterIndex::new(2),
            5.0,
        )]);
        let mut assignment = AssignmentPlan::new(3, 2);
        assignment.assign(UserIndex::new(0), RouterIndex::new(2));

        (model, NetworkPlan::new(selection, backbone, assignment))
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), ExportError>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("write succeeds");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_selected_router_table() {
        let (model, plan) = fixture();
        let writer = PlanWriter::new(&model, &plan);
        let text = render(|buf| writer.write_selected_routers(buf));
        assert_eq!(
            text,
            "id,x,y,cost,coverage,capacity,load\n10,0,0,100,5,2,0\n30,3,4,100,5,1,1\n"
        );
    }

    #[test]
    fn test_backbone_table_uses_router_ids() {
        let (model, plan) = fixture();
        let writer = PlanWriter::new(&model, &plan);
        let text = render(|buf| writer.write_backbone(buf));
        assert_eq!(text, "from,to,distance\n10,30,5.0\n");
    }

    #[test]
    fn test_assignment_table_skips_unassigned_users() {
        let (model, plan) = fixture();
        let writer = PlanWriter::new(&model, &plan);
        let text = render(|buf| writer.write_assignments(buf));
        assert_eq!(text, "user_id,router_id\n7,30\n");
    }

    #[test]
    fn test_empty_tables_keep_headers() {
        let model = NetworkModelBuilder::<i64>::new().build().expect("valid model");
        let plan = NetworkPlan::new(
            Selection::new(FixedBitSet::new(), 0, 0),
            Backbone::default(),
            AssignmentPlan::new(0, 0),
        );
        let writer = PlanWriter::new(&model, &plan);
        assert_eq!(
            render(|buf| writer.write_selected_routers(buf)),
            "id,x,y,cost,coverage,capacity,load\n"
        );
        assert_eq!(render(|buf| writer.write_backbone(buf)), "from,to,distance\n");
        assert_eq!(render(|buf| writer.write_assignments(buf)), "user_id,router_id\n");
    }

    #[test]
    fn test_write_to_dir_creates_all_tables() {
        let (model, plan) = fixture();
        let dir = tempfile::tempdir().expect("tempdir");
        PlanWriter::new(&model, &plan)
            .write_to_dir(dir.path())
            .expect("write succeeds");

        for name in [SELECTED_ROUTERS_FILE, BACKBONE_EDGES_FILE, ASSIGNMENTS_FILE] {
            assert!(dir.path().join(name).is_file(), "missing {}", name);
        }
    }
}
