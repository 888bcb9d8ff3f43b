// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience edits on children lists.
//!
//! Each helper builds the new list, commits it through
//! [`Scene::set_children_list`], and reports [`UpdateFlags::CHILDREN_LIST`].

use alloc::vec::Vec;

use crate::error::Error;
use crate::scene::Scene;
use crate::types::{NodeId, UpdateFlags};

impl Scene {
    /// Append `child` to `parent`, above its siblings.
    pub fn add_front(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        let mut list = self.children_of(parent).to_vec();
        list.push(child);
        self.commit(parent, &list)
    }

    /// Insert `child` into `parent`, below its siblings.
    pub fn add_back(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        let mut list = self.children_of(parent).to_vec();
        list.insert(0, child);
        self.commit(parent, &list)
    }

    /// Detach `child` from its parent. Detached nodes are left alone.
    pub fn remove_child(&mut self, child: NodeId) -> Result<(), Error> {
        self.node(child)?;
        let Some(parent) = self.parent_of(child) else {
            return Ok(());
        };
        let list = self.without(parent, child);
        self.commit(parent, &list)
    }

    /// Move `child` to `parent`, above its new siblings.
    pub fn readd_front(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.check_move(parent, child)?;
        self.remove_child(child)?;
        self.add_front(parent, child)
    }

    /// Move `child` to `parent`, below its new siblings.
    pub fn readd_back(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.check_move(parent, child)?;
        self.remove_child(child)?;
        self.add_back(parent, child)
    }

    /// Move `child` above its siblings.
    ///
    /// Returns `false` without reporting anything if it is already on top or detached.
    pub fn raise_to_front(&mut self, child: NodeId) -> Result<bool, Error> {
        self.node(child)?;
        let Some(parent) = self.parent_of(child) else {
            return Ok(false);
        };
        if self.children_of(parent).last() == Some(&child) {
            return Ok(false);
        }
        let mut list = self.without(parent, child);
        list.push(child);
        self.commit(parent, &list)?;
        Ok(true)
    }

    /// Reject a move before `child` is detached, so a failed move leaves it in place.
    fn check_move(&self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.node(child)?;
        if !self.node(parent)?.kind.is_container() {
            return Err(Error::NotFloating);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle);
        }
        Ok(())
    }

    fn without(&self, parent: NodeId, child: NodeId) -> Vec<NodeId> {
        self.children_of(parent)
            .iter()
            .copied()
            .filter(|&c| c != child)
            .collect()
    }

    fn commit(&mut self, parent: NodeId, list: &[NodeId]) -> Result<(), Error> {
        self.set_children_list(parent, list)?;
        self.update(parent, UpdateFlags::CHILDREN_LIST);
        Ok(())
    }
}
