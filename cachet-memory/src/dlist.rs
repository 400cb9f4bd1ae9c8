// Copyright 2026 cachet Project Authors
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

use crate::slab::{Slab, Token};

struct Node<T> {
    val: T,

    prev: Option<Token>,
    next: Option<Token>,
}

/// A doubly linked list whose nodes live in a [`Slab`].
///
/// Links are slab tokens instead of pointers. A node can be unlinked or relinked in O(1) given its token, which is
/// what the LRU index keeps per key.
pub struct SlabLinkedList<T> {
    slab: Slab<Node<T>>,
    head: Option<Token>,
    tail: Option<Token>,
}

impl<T> Default for SlabLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlabLinkedList<T> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            slab: Slab::new(),
            head: None,
            tail: None,
        }
    }

    /// Get the value of the token.
    pub fn get(&self, token: Token) -> Option<&T> {
        self.slab.get(token).map(|node| &node.val)
    }

    /// Get the mutable value of the token.
    pub fn get_mut(&mut self, token: Token) -> Option<&mut T> {
        self.slab.get_mut(token).map(|node| &mut node.val)
    }

    /// Link a new value at the head of the list.
    pub fn push_front(&mut self, val: T) -> Token {
        let token = self.slab.insert(Node {
            val,
            prev: None,
            next: None,
        });
        self.link_front(token);
        token
    }

    /// Unlink and return the value at the tail of the list.
    pub fn pop_back(&mut self) -> Option<T> {
        let token = self.tail?;
        self.remove(token)
    }

    /// Unlink and return the value of the token.
    pub fn remove(&mut self, token: Token) -> Option<T> {
        self.slab.get(token)?;
        self.unlink(token);
        self.slab.remove(token).map(|node| node.val)
    }

    /// Relink the node of the token at the head of the list.
    ///
    /// Returns `false` if the token does not refer to a node of the list.
    pub fn move_to_front(&mut self, token: Token) -> bool {
        if self.slab.get(token).is_none() {
            return false;
        }
        if self.head != Some(token) {
            self.unlink(token);
            self.link_front(token);
        }
        true
    }

    /// Iterate from the head to the tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            token: self.head,
            list: self,
        }
    }

    /// Count of linked nodes.
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Returns `true` if the list has no node.
    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }

    fn node(&self, token: Token) -> &Node<T> {
        match self.slab.get(token) {
            Some(node) => node,
            None => unreachable!("dangling token in linked list: {token:?}"),
        }
    }

    fn node_mut(&mut self, token: Token) -> &mut Node<T> {
        match self.slab.get_mut(token) {
            Some(node) => node,
            None => unreachable!("dangling token in linked list: {token:?}"),
        }
    }

    fn link_front(&mut self, token: Token) {
        let head = self.head;
        {
            let node = self.node_mut(token);
            node.prev = None;
            node.next = head;
        }
        match head {
            Some(head) => self.node_mut(head).prev = Some(token),
            None => self.tail = Some(token),
        }
        self.head = Some(token);
    }

    fn unlink(&mut self, token: Token) {
        let (prev, next) = {
            let node = self.node_mut(token);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }
}

/// Iterator over a [`SlabLinkedList`] from head to tail.
pub struct Iter<'a, T> {
    token: Option<Token>,
    list: &'a SlabLinkedList<T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.token?);
        self.token = node.next;
        Some(&node.val)
    }
}
