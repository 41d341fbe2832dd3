//! HTML for the four pages.
//!
//! Markup is built with maud, which escapes every spliced value, so backend
//! and user text can be interpolated directly.

use krill_core::{ContactPage, MutationState, PostsPage, TodoRow, TodosPage};
use maud::{html, Markup, DOCTYPE};

fn layout(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                link rel="icon" href="/favicon.ico";
            }
            body { (body) }
        }
    }
    .into_string()
}

fn error_banner(message: &str) -> Markup {
    html! {
        p class="error" role="alert" { (message) }
    }
}

pub fn home() -> String {
    let body = html! {
        div class="flex flex-col items-center justify-center min-h-screen py-2" {
            main class="flex flex-col items-center justify-center flex-1 w-full px-20 text-center" {
                h1 class="text-6xl font-bold" { "Krill Space" }
                p class="mt-3 text-2xl" { "A little space for big things." }
                div class="flex flex-wrap items-center justify-around max-w-4xl mt-6 sm:w-full" {
                    a href="/todos" class="p-6 mt-6 text-left border w-96 rounded-xl" {
                        h3 class="text-2xl font-bold" { "Todos →" }
                        p class="mt-4 text-xl" { "What are we doing today?" }
                    }
                    a href="/posts" class="p-6 mt-6 text-left border w-96 rounded-xl" {
                        h3 class="text-2xl font-bold" { "Blog →" }
                        p class="mt-4 text-xl" { "Let's write our thoughts out for all to see. Yay!" }
                    }
                }
            }
            footer class="flex items-center justify-center w-full h-24 border-t" {
                a class="flex items-center justify-center" href="/" { "Home" }
            }
        }
    };
    layout("Krill Space", body)
}

pub fn contact(page: &ContactPage) -> String {
    let body = html! {
        main class="flex flex-col items-center justify-center flex-1 w-full px-20 text-center" {
            @if let Some(message) = page.person.error() {
                (error_banner(message))
            }
            h1 class="text-6xl font-bold" { "Hello, " (page.name()) }
            textarea name="message" id="message" {}
            button type="button" onclick="alert('Hey!')" { "Send." }
        }
    };
    layout("Contact Page", body)
}

pub fn posts(page: &PostsPage) -> String {
    let body = html! {
        @if let Some(message) = page.posts.error() {
            (error_banner(message))
        }
        ul {
            @for post in page.posts() {
                li data-key={ "key" (post.id) } { (post.title) }
            }
        }
    };
    layout("Posts", body)
}

pub fn todos(page: &TodosPage) -> String {
    let body = html! {
        @if let Some(message) = page.list_error() {
            (error_banner(message))
        }
        @for failure in page.failures() {
            (error_banner(&failure.message))
        }
        @if page.is_loading() {
            p class="loading" { "Loading…" }
        }
        table class="w-full max-w-prose" {
            thead {
                tr { th { "✔" } th { "Title" } th {} }
            }
            tbody {
                @for row in page.visible_rows() {
                    (todo_row(row, page.mutation_state(row.id())))
                }
            }
            tfoot {
                tr {
                    td { span role="img" aria-label="plus" { "➕" } }
                    td {
                        form method="post" action="/todos" {
                            input type="text" name="new-todo" id="new-todo" value=(page.draft())
                                placeholder="Add a new todo here...";
                        }
                    }
                    td {}
                }
                tr {
                    td colspan="3" {
                        form method="post" action="/todos/show-completed" {
                            label for="showCompleted" {
                                input type="checkbox" name="showCompleted" id="showCompleted"
                                    checked[page.show_completed()] onchange="this.form.submit()";
                                " Show Completed"
                            }
                        }
                    }
                }
            }
        }
    };
    layout("Todos", body)
}

fn todo_row(row: &TodoRow, state: Option<MutationState>) -> Markup {
    let todo = row.todo();
    let id = todo.id;
    let class = if todo.completed { "title line-through" } else { "title" };
    html! {
        tr class="todo-row" id={ "todo-row-" (id) } {
            td {
                form method="post" action={ "/todos/" (id) "/toggle" } {
                    input type="checkbox" name={ "completed-" (id) } checked[todo.completed]
                        onchange="this.form.submit()";
                }
            }
            td {
                @if row.is_editing() {
                    form method="post" action={ "/todos/" (id) "/title" } {
                        input type="text" name="title" id={ "todo-" (id) } value=(todo.title)
                            autofocus onblur="this.form.submit()";
                    }
                } @else {
                    form method="post" action={ "/todos/" (id) "/edit" } {
                        button type="submit" class=(class) { (todo.title) }
                    }
                }
                @match state {
                    Some(MutationState::InFlight) => small class="saving" { "saving…" },
                    Some(MutationState::Failed(message)) => small class="error" { (message) },
                    None => {},
                }
            }
            td {
                form method="post" action={ "/todos/" (id) "/delete" } {
                    button type="submit" class="delete" { "✖" }
                }
            }
        }
    }
}
