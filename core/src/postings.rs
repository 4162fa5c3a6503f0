//! Linear-time set algebra over ascending, duplicate-free posting lists.

use crate::DocId;

/// AND: ids present in both lists.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// OR: ids present in either list, each once.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len() + b.len());
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// `a \ b`, equivalent to `a AND NOT b` without materializing the complement.
pub fn difference(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len());
    while i < a.len() {
        if j >= b.len() {
            out.extend_from_slice(&a[i..]);
            break;
        }
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// NOT: every id in `0..n_docs` missing from `p`.
pub fn complement(p: &[DocId], n_docs: u32) -> Vec<DocId> {
    let mut out = Vec::with_capacity((n_docs as usize).saturating_sub(p.len()));
    let mut j = 0;
    for d in 0..n_docs {
        if j < p.len() && p[j] == d {
            j += 1;
        } else {
            out.push(d);
        }
    }
    out
}
