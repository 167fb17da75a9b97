//! Word-respecting chunk splitting.

/// Split `text` into chunks of roughly `chunk_size` characters.
///
/// Words are the pieces between single spaces and are never split. A chunk
/// accumulates words until adding the next one would push it past the
/// budget; a single word longer than the budget becomes its own chunk.
/// Every chunk after the first starts with the space that separated it from
/// the previous chunk, so concatenating the chunks restores `text` exactly.
///
/// ```rust
/// use cellagent_workflow::split_into_chunks;
///
/// let chunks = split_into_chunks("alpha beta gamma", 10);
/// assert_eq!(chunks, vec!["alpha beta", " gamma"]);
/// assert_eq!(chunks.concat(), "alpha beta gamma");
/// ```
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();
    let mut current_len = current.chars().count();

    for word in words {
        let word_len = word.chars().count();
        if current_len + 1 + word_len > chunk_size {
            // A run of separators stays with the next word.
            if current.bytes().any(|b| b != b' ') {
                chunks.push(std::mem::take(&mut current));
            }
            current_len = 0;
        } else {
            current_len += 1;
        }
        current.push(' ');
        current.push_str(word);
        current_len += word_len;
    }

    // Trailing separators belong to the last word.
    match chunks.last_mut() {
        Some(last) if current.bytes().all(|b| b == b' ') => last.push_str(&current),
        _ => chunks.push(current),
    }
    chunks
}
