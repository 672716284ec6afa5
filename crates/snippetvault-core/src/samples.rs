//! Sample snippets seeded into an empty vault on first run.

use chrono::{DateTime, Utc};

use crate::models::{Snippet, SnippetId};

const QUICK_SORT: &str = r"function quickSort(arr) {
  if (arr.length <= 1) {
    return arr;
  }

  const pivot = arr[Math.floor(arr.length / 2)];
  const left = [];
  const right = [];
  const equal = [];

  for (let val of arr) {
    if (val < pivot) {
      left.push(val);
    } else if (val > pivot) {
      right.push(val);
    } else {
      equal.push(val);
    }
  }

  return [
    ...quickSort(left),
    ...equal,
    ...quickSort(right)
  ];
}";

const USE_EFFECT: &str = r"import { useState, useEffect } from 'react';

function ExampleComponent() {
  const [data, setData] = useState(null);
  const [loading, setLoading] = useState(true);

  useEffect(() => {
    async function fetchData() {
      try {
        setLoading(true);
        const response = await fetch('https://api.example.com/data');
        const result = await response.json();
        setData(result);
      } catch (error) {
        console.error('Error fetching data:', error);
      } finally {
        setLoading(false);
      }
    }

    fetchData();

    return () => {};
  }, []);

  if (loading) return <div>Loading...</div>;
  if (!data) return <div>No data found</div>;

  return (
    <div>
      <h1>{data.title}</h1>
      <p>{data.description}</p>
    </div>
  );
}";

const CSS_GRID: &str = r".grid-container {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
  grid-gap: 1rem;
  padding: 1rem;
}

.grid-item {
  background-color: #f8f9fa;
  border-radius: 4px;
  padding: 1rem;
  box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
  transition: transform 0.2s ease-in-out;
}

@media (max-width: 768px) {
  .grid-container {
    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  }
}";

fn timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |value| value.with_timezone(&Utc))
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    description: &str,
    language: &str,
    code: &str,
    tags: &[&str],
    favorite: bool,
    (created_at, updated_at): (&str, &str),
) -> Snippet {
    Snippet {
        id: SnippetId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        language: language.to_string(),
        code: code.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        favorite,
        created_at: timestamp(created_at),
        updated_at: timestamp(updated_at),
    }
}

/// The three starter snippets shown in a fresh vault.
#[must_use]
pub fn sample_snippets() -> Vec<Snippet> {
    vec![
        sample(
            "1",
            "Quick Sort Algorithm",
            "An efficient sorting algorithm with O(n log n) average time complexity",
            "javascript",
            QUICK_SORT,
            &["algorithm", "sorting", "javascript"],
            true,
            ("2025-02-15T10:30:00Z", "2025-03-10T14:20:00Z"),
        ),
        sample(
            "2",
            "React useEffect Hook",
            "Example of using the useEffect hook in React for side effects",
            "jsx",
            USE_EFFECT,
            &["react", "hooks", "javascript"],
            false,
            ("2025-01-20T09:15:00Z", "2025-03-15T11:45:00Z"),
        ),
        sample(
            "3",
            "CSS Grid Layout",
            "A responsive grid layout using CSS Grid",
            "css",
            CSS_GRID,
            &["css", "layout", "responsive"],
            true,
            ("2025-02-05T16:20:00Z", "2025-03-01T08:30:00Z"),
        ),
    ]
}
