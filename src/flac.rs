//! FLAC: a single saturating-flow run from a set of terminals back
//! toward the root.
//!
//! FLAC simulates a continuous-time process: every vertex with at
//! least one source draws flow through its cheapest unsaturated
//! entering arc at a rate equal to its number of distinct sources.
//! Arcs saturate in increasing time order, driven by a priority queue;
//! each saturation either extends the flow one arc closer to the root
//! or is vetoed as a conflict (it would merge two already-connected
//! components). The run ends the moment the root is reached, handing
//! G_F a partial arborescence and the terminals it spans.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, VecDeque};
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::entering_index::{key_arc, EnteringKey};
use crate::graph::WorkingGraph;
use crate::instance::{Arc, Instance, VertexId};

type SourceSet = Rc<FxHashSet<VertexId>>;

/// A scheduled saturation event: vertex `vertex`'s next entering arc is
/// due to saturate at `time`, with `tail_is_not_root` breaking ties so
/// a candidate arc whose tail is the root always wins.
#[derive(Clone, Copy, Debug)]
struct SchedEntry {
    time: f64,
    tail_is_not_root: bool,
    vertex: VertexId,
}

impl PartialEq for SchedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.tail_is_not_root == other.tail_is_not_root
    }
}

impl Eq for SchedEntry {}

impl PartialOrd for SchedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `BinaryHeap` is a max-heap; we want the smallest `(time,
// tail_is_not_root)` out first, so comparisons are reversed here.
impl Ord for SchedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.tail_is_not_root.cmp(&self.tail_is_not_root))
    }
}

/// Per-run FLAC state (component C of the design). Constructed fresh
/// by [`FlacState::reinit`] for every invocation and discarded once it
/// returns.
pub(crate) struct FlacState {
    terminals: BTreeSet<VertexId>,
    saturated: FxHashSet<Arc>,
    sources: Vec<SourceSet>,
    /// The key of each vertex's current `nextSatArc`, i.e. its position
    /// in the sorted entering-arc iterator. `None` means either no
    /// entering arc has been considered yet, or none remain.
    next_sat_key: Vec<Option<EnteringKey>>,
    /// Mirrors the priority queue's authoritative key per vertex, so
    /// stale heap entries (from a prior `decreaseKey`) can be detected
    /// lazily on pop instead of removed eagerly.
    scheduled: Vec<Option<(f64, bool)>>,
    pq: BinaryHeap<SchedEntry>,
    time: f64,
}

impl FlacState {
    pub(crate) fn reinit<I: Instance>(graph: &WorkingGraph<'_, I>, terminals: &BTreeSet<VertexId>) -> Self {
        let n = graph.instance.vertex_count();
        let mut sources = vec![Rc::new(FxHashSet::default()); n];
        for &t in terminals {
            let mut s = FxHashSet::default();
            s.insert(t);
            sources[t.0] = Rc::new(s);
        }
        let mut state = Self {
            terminals: terminals.clone(),
            saturated: FxHashSet::default(),
            sources,
            next_sat_key: vec![None; n],
            scheduled: vec![None; n],
            pq: BinaryHeap::new(),
            time: 0.0,
        };
        for &t in terminals {
            state.schedule_next(graph, t);
        }
        state
    }

    fn rate(&self, v: VertexId) -> usize {
        self.sources[v.0].len()
    }

    fn next_sat_arc(&self, v: VertexId) -> Option<Arc> {
        self.next_sat_key[v.0].map(|(_, tail, head)| Arc::new(tail, head))
    }

    /// Component D / §4.D: advance `v` to its next-cheapest unsaturated
    /// entering arc and (re)schedule its saturation time.
    fn schedule_next<I: Instance>(&mut self, graph: &WorkingGraph<'_, I>, v: VertexId) {
        let previous = self.next_sat_arc(v);
        match graph.entering_index.next_after(v, self.next_sat_key[v.0]) {
            None => {
                self.next_sat_key[v.0] = None;
                self.scheduled[v.0] = None;
            }
            Some(key @ (cost, tail, _head)) => {
                let rate = self.rate(v) as f64;
                let delta = match previous {
                    None => cost as f64 / rate,
                    Some(b) => (cost - graph.cost(b)) as f64 / rate,
                };
                let tail_is_not_root = tail != graph.instance.root();
                let new_time = self.time + delta;
                self.next_sat_key[v.0] = Some(key);
                self.scheduled[v.0] = Some((new_time, tail_is_not_root));
                self.pq.push(SchedEntry {
                    time: new_time,
                    tail_is_not_root,
                    vertex: v,
                });
            }
        }
    }

    /// Bring a vertex's scheduled saturation time forward (decrease
    /// key) without touching which arc it is waiting on.
    fn reschedule(&mut self, v: VertexId, new_time: f64) {
        if let Some((_, tail_is_not_root)) = self.scheduled[v.0] {
            self.scheduled[v.0] = Some((new_time, tail_is_not_root));
            self.pq.push(SchedEntry {
                time: new_time,
                tail_is_not_root,
                vertex: v,
            });
        }
    }

    fn pop_valid(&mut self) -> Option<SchedEntry> {
        loop {
            let entry = self.pq.pop()?;
            if self.scheduled[entry.vertex.0] == Some((entry.time, entry.tail_is_not_root)) {
                return Some(entry);
            }
            // Stale entry left behind by an earlier decreaseKey/advance; discard it.
        }
    }

    fn union_sources(&mut self, w: VertexId, incoming: &SourceSet) {
        if incoming.is_empty() {
            return;
        }
        if self.sources[w.0].is_empty() {
            self.sources[w.0] = Rc::clone(incoming);
            return;
        }
        if Rc::ptr_eq(&self.sources[w.0], incoming) {
            return;
        }
        let merged: FxHashSet<VertexId> = self.sources[w.0].union(incoming).copied().collect();
        self.sources[w.0] = Rc::new(merged);
    }

    /// Component F / §4.F: would saturating `(u, v)` merge two already
    /// connected flow components? Walk backward from `u` over saturated
    /// arcs, and check whether any reached vertex's sources intersect
    /// `sources(v)`.
    fn find_conflict<I: Instance>(&self, graph: &WorkingGraph<'_, I>, u: VertexId, v: VertexId) -> bool {
        let target = &self.sources[v.0];
        if target.is_empty() {
            return false;
        }
        let mut stack = vec![u];
        let mut visited = FxHashSet::default();
        while let Some(w) = stack.pop() {
            if !visited.insert(w) {
                continue;
            }
            if !self.sources[w.0].is_disjoint(target) {
                return true;
            }
            for &key in graph.entering_index.before(w, self.next_sat_key[w.0]) {
                if self.saturated.contains(&key_arc(key)) {
                    stack.push(key.1);
                }
            }
        }
        false
    }

    /// Component E / §4.E: commit `a` as saturated and propagate
    /// `sources(a.head)` backward into every vertex already connected
    /// to `a.tail` through saturated arcs, accelerating or introducing
    /// their schedules as needed.
    fn saturate_arc<I: Instance>(&mut self, graph: &WorkingGraph<'_, I>, a: Arc) {
        self.saturated.insert(a);
        let flow = Rc::clone(&self.sources[a.head.0]);
        let mut queue = VecDeque::from([a.tail]);
        let mut visited = FxHashSet::default();
        while let Some(w) = queue.pop_front() {
            if !visited.insert(w) {
                continue;
            }
            let prev_rate = self.rate(w);
            self.union_sources(w, &flow);
            let new_rate = self.rate(w);
            if prev_rate > 0 {
                if new_rate != prev_rate {
                    if let Some((scheduled_time, _)) = self.scheduled[w.0] {
                        let new_time =
                            self.time + (scheduled_time - self.time) * (prev_rate as f64 / new_rate as f64);
                        self.reschedule(w, new_time);
                    }
                }
            } else {
                self.schedule_next(graph, w);
            }
            for &key in graph.entering_index.before(w, self.next_sat_key[w.0]) {
                if self.saturated.contains(&key_arc(key)) {
                    queue.push_back(key.1);
                }
            }
        }
    }

    /// Component G / §4.G: forward walk from the root over saturated
    /// outgoing arcs, collecting the tree and the terminals it reaches.
    fn extract_tree<I: Instance>(&self, graph: &WorkingGraph<'_, I>) -> (BTreeSet<Arc>, BTreeSet<VertexId>) {
        let mut tree = BTreeSet::new();
        let mut reached = BTreeSet::new();
        let mut stack = vec![graph.instance.root()];
        let mut visited = FxHashSet::default();
        while let Some(x) = stack.pop() {
            if !visited.insert(x) {
                continue;
            }
            if self.terminals.contains(&x) {
                reached.insert(x);
            }
            for &oa in graph.instance.outgoing_arcs(x) {
                if self.saturated.contains(&oa) {
                    tree.insert(oa);
                    stack.push(oa.head);
                }
            }
        }
        (tree, reached)
    }

    /// Component C's outer loop / §4.C. Returns the tree and reached
    /// terminals once the root is touched, or `None` if the priority
    /// queue empties first (this FLAC run cannot reach the root).
    pub(crate) fn run<I: Instance>(mut self, graph: &WorkingGraph<'_, I>) -> Option<(BTreeSet<Arc>, BTreeSet<VertexId>)> {
        loop {
            let entry = self.pop_valid()?;
            let v = entry.vertex;
            let a = self
                .next_sat_arc(v)
                .expect("a scheduled vertex always has a pending candidate arc");
            self.time = entry.time;
            let u = a.tail;
            if u == graph.instance.root() {
                self.saturated.insert(a);
                return Some(self.extract_tree(graph));
            }
            let conflict = self.find_conflict(graph, u, v);
            self.schedule_next(graph, v);
            if !conflict {
                self.saturate_arc(graph, a);
            }
        }
    }
}
