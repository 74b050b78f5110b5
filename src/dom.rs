/// Mutation surface the view layer uses against the loaded page. All
/// operations report whether the target element existed; they never fail
/// harder than that, so a structurally incomplete skin degrades to skipped
/// writes instead of errors.
pub trait DocumentBinding {
    fn has_element(&self, id: &str) -> bool;
    fn add_class(&mut self, id: &str, class: &str) -> bool;
    fn remove_class(&mut self, id: &str, class: &str) -> bool;
    fn set_text(&mut self, id: &str, text: &str) -> bool;
    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
}

impl Node {
    pub fn element(name: &str) -> Self {
        Node::Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: &str) -> Self {
        Node::Text {
            text: text.to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.set_attribute("id", id);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            Node::Text { .. } => None,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Node::Element { attributes, .. } = self {
            if let Some(entry) = attributes
                .iter_mut()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
            {
                entry.1 = Some(value.to_string());
            } else {
                attributes.push((name.to_string(), Some(value.to_string())));
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|v| v.split_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attribute("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attribute("class") else {
            return;
        };
        let remaining = existing
            .split_whitespace()
            .filter(|t| *t != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", &remaining);
    }

    /// Concatenated text of the direct text children.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text } => text.clone(),
            Node::Element { children, .. } => children
                .iter()
                .filter_map(|c| match c {
                    Node::Text { text } => Some(text.as_str()),
                    Node::Element { .. } => None,
                })
                .collect(),
        }
    }

    pub fn set_text_content(&mut self, text: &str) {
        if let Node::Element { children, .. } = self {
            children.clear();
            children.push(Node::text(text));
        }
    }
}

fn find_by_id<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
    if node.attribute("id") == Some(id) {
        return Some(node);
    }
    if let Node::Element { children, .. } = node {
        for child in children {
            if let Some(found) = find_by_id(child, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_by_id_mut<'a>(node: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    if node.attribute("id") == Some(id) {
        return Some(node);
    }
    if let Node::Element { children, .. } = node {
        for child in children {
            if let Some(found) = find_by_id_mut(child, id) {
                return Some(found);
            }
        }
    }
    None
}

/// The document tree of a loaded skin page. Hosts hand one of these (or any
/// other `DocumentBinding`) to the view when the surface reports the page
/// load finished.
#[derive(Debug, Clone)]
pub struct PageDocument {
    root: Node,
}

impl PageDocument {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn element(&self, id: &str) -> Option<&Node> {
        find_by_id(&self.root, id)
    }
}

impl DocumentBinding for PageDocument {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        match find_by_id_mut(&mut self.root, id) {
            Some(node) => {
                node.add_class(class);
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match find_by_id_mut(&mut self.root, id) {
            Some(node) => {
                node.remove_class(class);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match find_by_id_mut(&mut self.root, id) {
            Some(node) => {
                node.set_text_content(text);
                true
            }
            None => false,
        }
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        match find_by_id_mut(&mut self.root, id) {
            Some(node) => {
                node.set_attribute(name, value);
                true
            }
            None => false,
        }
    }
}
