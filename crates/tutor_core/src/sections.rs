//! Splits a tutor reply into its explanation and the embedded blocks.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockKind {
    /// Narration script for the generated video.
    Script,
    /// Scene source handed to the renderer.
    Code,
}

impl BlockKind {
    /// Extraction order. Script blocks are removed before code blocks.
    pub const ALL: [BlockKind; 2] = [BlockKind::Script, BlockKind::Code];

    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            BlockKind::Script => ("{script}", "{/script}"),
            BlockKind::Code => ("{manim}", "{/manim}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    pub kind: BlockKind,
    /// Trimmed text between the markers.
    pub content: String,
    /// Byte offset into `Sections::explanation` where the block was removed.
    pub at: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    pub explanation: String,
    /// Ordered as the blocks appeared in the original text.
    pub blocks: Vec<ExtractedBlock>,
}

impl Sections {
    pub fn block(&self, kind: BlockKind) -> Option<&str> {
        self.blocks
            .iter()
            .find(|block| block.kind == kind)
            .map(|block| block.content.as_str())
    }

    pub fn script(&self) -> Option<&str> {
        self.block(BlockKind::Script)
    }

    pub fn code(&self) -> Option<&str> {
        self.block(BlockKind::Code)
    }

    /// Puts the markers back around each block at its original position.
    pub fn reassemble(&self) -> String {
        let mut out = String::with_capacity(self.explanation.len());
        let mut cursor = 0;
        for block in &self.blocks {
            let (open, close) = block.kind.markers();
            out.push_str(&self.explanation[cursor..block.at]);
            out.push_str(open);
            out.push_str(&block.content);
            out.push_str(close);
            cursor = block.at;
        }
        out.push_str(&self.explanation[cursor..]);
        out
    }
}

/// Removes at most one block of each [`BlockKind`] from `body`.
///
/// An opening marker with no closing marker swallows the rest of the text.
pub fn extract_sections(body: &str) -> Sections {
    let mut sections = Sections {
        explanation: body.to_string(),
        blocks: Vec::new(),
    };
    for kind in BlockKind::ALL {
        take_block(&mut sections, kind);
    }
    sections
}

fn take_block(sections: &mut Sections, kind: BlockKind) {
    let (open, close) = kind.markers();
    let text = &sections.explanation;
    let Some(start) = text.find(open) else {
        return;
    };

    let after_open = &text[start + open.len()..];
    let (inner, tail_start) = match after_open.find(close) {
        Some(end) => (&after_open[..end], start + open.len() + end + close.len()),
        None => (after_open, text.len()),
    };
    let content = inner.trim().to_string();
    let removed = tail_start - start;

    // Earlier blocks that sat after this one move left by the removed span.
    let mut insert_at = sections.blocks.len();
    for (idx, block) in sections.blocks.iter_mut().enumerate() {
        if start < block.at {
            insert_at = insert_at.min(idx);
            block.at = if block.at >= tail_start {
                block.at - removed
            } else {
                start
            };
        }
    }

    let mut explanation = String::with_capacity(text.len() - removed);
    explanation.push_str(&text[..start]);
    explanation.push_str(&text[tail_start..]);
    sections.explanation = explanation;
    sections.blocks.insert(
        insert_at,
        ExtractedBlock {
            kind,
            content,
            at: start,
        },
    );
}
