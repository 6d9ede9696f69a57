use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn book_ref() -> Value {
    json!({ "$ref": "#/components/schemas/Book" })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Numeric book identifier",
        "schema": { "type": "string" }
    })
}

fn book_input_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookInput" }
            }
        }
    })
}

/// OpenAPI fragment for the books module; paths are relative to `/api/books`.
pub fn document() -> Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books, newest first",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "search",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of title, author or publisher",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "genre",
                            "in": "query",
                            "required": false,
                            "description": "Exact genre; `all` disables the filter",
                            "schema": { "type": "string" }
                        }
                    ],
                    "responses": {
                        "200": json_response("Matching books", json!({ "type": "array", "items": book_ref() })),
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_input_body(),
                    "responses": {
                        "201": json_response("Created book", book_ref()),
                        "400": error_response("Missing required field or malformed number"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/genres": {
                "get": {
                    "summary": "Distinct genres present in the catalog",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("Sorted genres", json!({ "type": "array", "items": { "type": "string" } })),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/genres/suggested": {
                "get": {
                    "summary": "Genre suggestions offered by the admin form",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("Suggested genres", json!({ "type": "array", "items": { "type": "string" } }))
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books module and store health",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        },
                        "500": error_response("Store unreachable")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Fetch one book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": json_response("The book", book_ref()),
                        "400": error_response("Invalid id"),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "put": {
                    "summary": "Replace every editable field of a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "requestBody": book_input_body(),
                    "responses": {
                        "200": json_response("Updated book", book_ref()),
                        "400": error_response("Invalid id, missing field or malformed number"),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "delete": {
                    "summary": "Delete a book permanently",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": json_response("Deletion confirmed", json!({ "$ref": "#/components/schemas/DeleteConfirmation" })),
                        "400": error_response("Invalid id"),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" },
                        "publisher": { "type": "string" },
                        "price": { "type": "number", "minimum": 0 },
                        "stock": { "type": "integer", "minimum": 0 },
                        "description": { "type": "string", "description": "May be null" },
                        "image1": { "type": "string", "format": "uri" },
                        "image2": { "type": "string", "format": "uri" },
                        "available": { "type": "boolean", "description": "Always stock > 0" },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "title", "author", "genre", "publisher", "price", "stock",
                        "image1", "image2", "available", "createdAt", "updatedAt"
                    ]
                },
                "BookInput": {
                    "type": "object",
                    "description": "price and stock accept numbers or numeric strings; stock defaults to 0",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" },
                        "publisher": { "type": "string" },
                        "price": { "type": "string" },
                        "stock": { "type": "string" },
                        "description": { "type": "string" },
                        "image1": { "type": "string", "format": "uri" },
                        "image2": { "type": "string", "format": "uri" }
                    },
                    "required": ["title", "author", "genre", "publisher", "price", "image1", "image2"]
                },
                "DeleteConfirmation": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}
