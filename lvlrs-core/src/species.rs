//! A species: a graph of levels connected by radiative transitions.

use crate::constants::BOLTZMANN_KEV_PER_K;
use crate::errors::{LvlrsError, LvlrsResult};
use crate::level::Level;
use crate::properties::Properties;
use crate::transition::Transition;
use ndarray::{Array1, Array2};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A set of levels (vertices) and transitions (directed edges from upper to
/// lower level) for one physical species.
///
/// Levels and transitions live in a stable-index graph arena, so
/// replace-on-duplicate insertion and cascading removal are O(degree)
/// operations. A separate insertion-order vector provides the stable
/// tie-break when levels share an energy: [`get_levels`](Self::get_levels)
/// always returns levels sorted ascending by energy, equal energies in
/// insertion order, and rate-matrix indices derive from that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    name: String,
    graph: StableDiGraph<Level, Transition>,
    insertion_order: Vec<NodeIndex>,
    properties: Properties,
}

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: StableDiGraph::default(),
            insertion_order: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn n_levels(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn n_transitions(&self) -> usize {
        self.graph.edge_count()
    }

    /// Adds a level. A structurally equal level (same energy and
    /// multiplicity) already present is replaced in place, keeping its
    /// position and its incident transitions; the level set never gains a
    /// duplicate.
    pub fn add_level(&mut self, level: Level) {
        match self.find_node(&level) {
            Some(node) => self.graph[node] = level,
            None => {
                let node = self.graph.add_node(level);
                self.insertion_order.push(node);
            }
        }
    }

    /// Removes a level and, first, every transition incident to it in
    /// either direction, so no transition is left dangling.
    ///
    /// Returns whether a structurally equal level was present.
    pub fn remove_level(&mut self, level: &Level) -> bool {
        match self.find_node(level) {
            Some(node) => {
                self.insertion_order.retain(|&n| n != node);
                // Stable-graph node removal drops incident edges with it.
                self.graph.remove_node(node);
                true
            }
            None => false,
        }
    }

    /// Adds a transition. Both endpoints must already be levels of this
    /// species; an existing transition with the same (upper, lower) pair is
    /// replaced.
    pub fn add_transition(&mut self, transition: Transition) -> LvlrsResult<()> {
        let upper = self
            .find_node(transition.upper())
            .ok_or_else(|| self.level_not_found(transition.upper()))?;
        let lower = self
            .find_node(transition.lower())
            .ok_or_else(|| self.level_not_found(transition.lower()))?;
        match self.graph.find_edge(upper, lower) {
            Some(edge) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge) {
                    *weight = transition;
                }
            }
            None => {
                self.graph.add_edge(upper, lower, transition);
            }
        }
        Ok(())
    }

    /// Removes the transition between the given (upper, lower) pair,
    /// returning it if it was present.
    pub fn remove_transition(&mut self, upper: &Level, lower: &Level) -> Option<Transition> {
        let upper = self.find_node(upper)?;
        let lower = self.find_node(lower)?;
        let edge = self.graph.find_edge(upper, lower)?;
        self.graph.remove_edge(edge)
    }

    /// All levels, sorted ascending by energy with insertion-order
    /// tie-break.
    pub fn get_levels(&self) -> Vec<&Level> {
        self.sorted_nodes()
            .into_iter()
            .map(|node| &self.graph[node])
            .collect()
    }

    /// All transitions, in no particular order.
    pub fn get_transitions(&self) -> Vec<&Transition> {
        self.graph.edge_weights().collect()
    }

    /// The levels reachable from `level` as the lower endpoint of a
    /// transition where `level` is the upper endpoint, sorted ascending by
    /// energy.
    pub fn get_lower_linked_levels(&self, level: &Level) -> Vec<&Level> {
        self.linked_levels(level, Direction::Outgoing)
    }

    /// The levels reachable from `level` as the upper endpoint of a
    /// transition where `level` is the lower endpoint, sorted ascending by
    /// energy.
    pub fn get_upper_linked_levels(&self, level: &Level) -> Vec<&Level> {
        self.linked_levels(level, Direction::Incoming)
    }

    /// Exact lookup of the transition between an (upper, lower) pair.
    /// Absence is an ordinary outcome, not an error.
    pub fn get_level_to_level_transition(
        &self,
        upper: &Level,
        lower: &Level,
    ) -> Option<&Transition> {
        let upper = self.find_node(upper)?;
        let lower = self.find_node(lower)?;
        let edge = self.graph.find_edge(upper, lower)?;
        self.graph.edge_weight(edge)
    }

    /// Equilibrium (Boltzmann) probabilities of the levels at the given
    /// temperature (K), ordered as [`get_levels`](Self::get_levels).
    ///
    /// Weights are `g_i exp(-(E_i - E_0) / kT)` with the ground-state energy
    /// subtracted before exponentiating, so small temperatures cannot
    /// underflow the whole weight vector. T = 0 is an explicit boundary
    /// case: all probability mass sits on the lowest-energy usable level.
    /// Levels flagged unusable get zero weight and the rest renormalize.
    pub fn compute_equilibrium_probabilities(&self, temperature: f64) -> LvlrsResult<Array1<f64>> {
        if temperature < 0.0 {
            return Err(LvlrsError::NegativeTemperature(temperature));
        }
        let nodes = self.sorted_nodes();
        let mut prob = Array1::zeros(nodes.len());
        if nodes.is_empty() {
            return Ok(prob);
        }

        let ground = nodes
            .iter()
            .position(|&node| self.graph[node].is_usable())
            .ok_or_else(|| {
                LvlrsError::Error(format!("species '{}' has no usable levels", self.name))
            })?;

        if temperature == 0.0 {
            prob[ground] = 1.0;
            return Ok(prob);
        }

        let ground_energy = self.graph[nodes[ground]].energy_kev();
        let kt = BOLTZMANN_KEV_PER_K * temperature;
        for (i, &node) in nodes.iter().enumerate() {
            let level = &self.graph[node];
            if level.is_usable() {
                prob[i] =
                    level.multiplicity() as f64 * (-(level.energy_kev() - ground_energy) / kt).exp();
            }
        }
        let total = prob.sum();
        prob /= total;
        Ok(prob)
    }

    /// The infinitesimal generator of the continuous-time Markov process
    /// over level occupation at the given temperature (K).
    ///
    /// Entry `[j, i]` accumulates the rate from level `i` into level `j`
    /// (indices per [`get_levels`](Self::get_levels) order) and each
    /// diagonal entry balances its column, so every column sums to zero:
    /// total probability is conserved.
    ///
    /// Transitions flagged unusable contribute no rate. A transition that
    /// is *not* flagged but touches an unusable level is an inconsistent
    /// property set and yields [`LvlrsError::InconsistentUsability`] rather
    /// than a guess.
    pub fn compute_rate_matrix(&self, temperature: f64) -> LvlrsResult<Array2<f64>> {
        if temperature < 0.0 {
            return Err(LvlrsError::NegativeTemperature(temperature));
        }
        let nodes = self.sorted_nodes();
        let index: HashMap<NodeIndex, usize> =
            nodes.iter().enumerate().map(|(i, &node)| (node, i)).collect();
        let mut matrix = Array2::zeros((nodes.len(), nodes.len()));

        for edge in self.graph.edge_references() {
            let transition = edge.weight();
            if !transition.is_usable() {
                continue;
            }
            if !self.graph[edge.source()].is_usable() || !self.graph[edge.target()].is_usable() {
                return Err(LvlrsError::InconsistentUsability {
                    upper_kev: transition.upper().energy_kev(),
                    lower_kev: transition.lower().energy_kev(),
                });
            }

            let i = index[&edge.source()];
            let j = index[&edge.target()];
            let r_down = transition.upper_to_lower_rate(temperature);
            let r_up = transition.lower_to_upper_rate(temperature);

            matrix[[j, i]] += r_down;
            matrix[[i, i]] -= r_down;
            matrix[[i, j]] += r_up;
            matrix[[j, j]] -= r_up;
        }
        Ok(matrix)
    }

    fn find_node(&self, level: &Level) -> Option<NodeIndex> {
        self.insertion_order
            .iter()
            .copied()
            .find(|&node| &self.graph[node] == level)
    }

    fn sorted_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes = self.insertion_order.clone();
        // Stable sort keeps insertion order for equal energies.
        nodes.sort_by(|&a, &b| {
            self.graph[a]
                .energy_kev()
                .partial_cmp(&self.graph[b].energy_kev())
                .unwrap_or(Ordering::Equal)
        });
        nodes
    }

    fn linked_levels(&self, level: &Level, direction: Direction) -> Vec<&Level> {
        let Some(node) = self.find_node(level) else {
            return Vec::new();
        };
        let mut linked: Vec<&Level> = self
            .graph
            .neighbors_directed(node, direction)
            .map(|neighbor| &self.graph[neighbor])
            .collect();
        linked.sort_by(|a, b| {
            a.energy_kev()
                .partial_cmp(&b.energy_kev())
                .unwrap_or(Ordering::Equal)
        });
        linked
    }

    fn level_not_found(&self, level: &Level) -> LvlrsError {
        LvlrsError::LevelNotFound {
            species: self.name.clone(),
            energy_kev: level.energy_kev(),
            multiplicity: level.multiplicity(),
        }
    }
}
