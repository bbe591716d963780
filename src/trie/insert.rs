use super::{Head, PatriciaTrie};
use crate::bits::{bit_at, first_diff_bit, BitKey};
use crate::error::InsertError;
use crate::observe::{NoopObserver, Observer, Step};

impl PatriciaTrie {
    /// Insert `key`.
    ///
    /// Fails without touching the trie if the key is malformed, already
    /// stored, or equal to a stored key up to trailing zeros.
    pub fn insert(&mut self, key: &str) -> Result<(), InsertError> {
        self.insert_with(key, &mut NoopObserver)
    }

    pub fn insert_with(&mut self, key: &str, observer: &mut dyn Observer) -> Result<(), InsertError> {
        let key = BitKey::parse(key)?;

        let head = match self.head {
            Head::Empty => {
                let id = self.nodes.alloc(key, 0);
                self.head = Head::Rooted(id);
                tracing::debug!(node = id.index(), "planted head");
                observer.on_step(&Step::Planted { node: id });
                return Ok(());
            }
            Head::Rooted(head) => head,
        };

        let t = self.descend(head, key.as_str(), observer).terminus;
        let existing = &self.nodes.get(t).key;
        if *existing == key {
            observer.on_step(&Step::Present { node: t });
            return Err(InsertError::AlreadyExists {
                key: key.to_string(),
            });
        }

        let d = first_diff_bit(existing.as_str(), key.as_str());
        if d as usize > existing.len().max(key.len()) {
            observer.on_step(&Step::Collision { node: t });
            return Err(InsertError::Indistinguishable {
                key: key.to_string(),
                existing: existing.to_string(),
            });
        }
        observer.on_step(&Step::Diverged { bit: d });

        let (p, x) = self.splice_point(head, key.as_str(), d);
        observer.on_step(&Step::SplicePoint {
            parent: p,
            displaced: x,
        });

        let orientation = self.config.orientation;
        let own_side = orientation.side(bit_at(key.as_str(), d));
        let parent_side = orientation.side(bit_at(key.as_str(), self.bit(p)));

        // The new node rests its own key on a self-loop and adopts whatever
        // `p` used to point at on the other side.
        let z = self.nodes.alloc(key, d);
        self.nodes.get_mut(z).set_link(own_side.opposite(), x);
        self.nodes.get_mut(p).set_link(parent_side, z);

        tracing::debug!(node = z.index(), parent = p.index(), bit = d, "spliced node");
        observer.on_step(&Step::Spliced {
            node: z,
            parent: p,
            side: parent_side,
        });
        Ok(())
    }
}
